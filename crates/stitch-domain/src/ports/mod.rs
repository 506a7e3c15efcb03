//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the application and infrastructure
//! layers.
//!
//! ## Organization
//!
//! - **executor** - The coordinating execution context that deferred
//!   deliveries and cross-thread writes are posted to

/// Coordinating execution context port
pub mod executor;

pub use executor::{MainExecutor, Task};
