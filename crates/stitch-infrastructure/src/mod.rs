//! # Infrastructure Layer
//!
//! Technical concerns around the Stitch runtime core: how it is configured,
//! how it logs and which executor drives deferred deliveries.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML + environment configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`executor`] | Tokio main loop implementing the executor port |
//! | [`bootstrap`] | Per-thread initialization from configuration |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod executor;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{StitchContext, init};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use executor::{MainLoop, MainLoopHandle};
