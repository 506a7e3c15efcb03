//! Lifecycle scope of a declared dependency

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle policy controlling shared vs. fresh instance resolution
///
/// | Scope | Resolution |
/// |-------|------------|
/// | `Application` | One memoized instance, constructed lazily on first access |
/// | `Unique` | A new instance from the factory on every resolution |
/// | `Cached` | Resolves like `Application`; may additionally be invalidated |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Dependency lasts the lifetime of the owning thread
    #[default]
    Application,
    /// Dependency is recreated on each resolution
    Unique,
    /// Dependency is memoized until explicitly invalidated
    Cached,
}

impl Scope {
    /// Whether resolutions under this scope share one memoized instance
    pub const fn is_memoized(self) -> bool {
        matches!(self, Self::Application | Self::Cached)
    }

    /// Lowercase name, as used in configuration files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Unique => "unique",
            Self::Cached => "cached",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "application" | "app" => Ok(Self::Application),
            "unique" => Ok(Self::Unique),
            "cached" => Ok(Self::Cached),
            other => Err(Error::configuration(format!(
                "Invalid scope: {other}. Use application, unique, or cached"
            ))),
        }
    }
}
