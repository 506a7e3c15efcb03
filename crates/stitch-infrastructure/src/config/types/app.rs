//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::dispatch::{DispatchConfig, ExecutorKind};
pub use super::logging::LoggingConfig;
pub use super::preconditions::PreconditionsConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Coordinating executor configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Contract violation handling
    #[serde(default)]
    pub preconditions: PreconditionsConfig,
}
