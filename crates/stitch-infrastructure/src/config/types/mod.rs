//! Configuration types module

pub mod app;
pub mod dispatch;
pub mod logging;
pub mod preconditions;

// Re-export main types
pub use app::*;
