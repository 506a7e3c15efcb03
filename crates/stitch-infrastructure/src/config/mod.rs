//! Configuration
//!
//! Layered configuration built with Figment:
//!
//! ```text
//! AppConfig::default()  ◄── stitch.toml  ◄── STITCH__SECTION__KEY
//! ```
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [dispatch]
//! executor = "tokio"
//! max_drain = 64
//!
//! [preconditions]
//! fatal = false
//! ```

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, DispatchConfig, ExecutorKind, LoggingConfig, PreconditionsConfig};
