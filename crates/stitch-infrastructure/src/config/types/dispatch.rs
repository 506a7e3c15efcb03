//! Coordinating executor configuration types

use crate::constants::DEFAULT_MAX_DRAIN;
use serde::{Deserialize, Serialize};
use stitch_domain::error::Error;
use std::fmt;
use std::str::FromStr;

/// Executor that deferred deliveries are posted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// In-thread task queue drained explicitly by the host
    #[default]
    Queue,
    /// Tokio main loop driven on a `LocalSet`
    Tokio,
}

impl ExecutorKind {
    /// Lowercase name, as used in configuration files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::Tokio => "tokio",
        }
    }
}

impl fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queue" => Ok(Self::Queue),
            "tokio" => Ok(Self::Tokio),
            other => Err(Error::configuration(format!(
                "Invalid executor: {other}. Use queue or tokio"
            ))),
        }
    }
}

/// Dispatch configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Executor installed on the coordinating thread
    pub executor: ExecutorKind,

    /// Maximum tasks run per drain call (0 = unbounded)
    pub max_drain: usize,
}

impl DispatchConfig {
    /// Queue executor with the default drain bound
    pub fn queue() -> Self {
        Self {
            executor: ExecutorKind::Queue,
            max_drain: DEFAULT_MAX_DRAIN,
        }
    }

    /// Tokio main loop with the default drain bound
    pub fn tokio() -> Self {
        Self {
            executor: ExecutorKind::Tokio,
            max_drain: DEFAULT_MAX_DRAIN,
        }
    }
}
