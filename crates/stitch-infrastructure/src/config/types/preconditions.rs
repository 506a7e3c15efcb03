//! Precondition handling configuration types

use serde::{Deserialize, Serialize};

/// Precondition configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreconditionsConfig {
    /// Panic on contract violations; when false, violations are only logged
    pub fatal: bool,
}

impl Default for PreconditionsConfig {
    fn default() -> Self {
        Self { fatal: true }
    }
}
