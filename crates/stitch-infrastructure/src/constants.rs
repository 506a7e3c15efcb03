//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Registry and observation constants are defined in
//! `stitch_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "stitch.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "stitch";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "STITCH";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "STITCH_LOG";

/// Fallback file stem for the rolling log file
pub const LOG_FILE_STEM: &str = "stitch";

// ============================================================================
// DISPATCH CONSTANTS
// ============================================================================

/// Default bound on tasks run per drain call (0 = unbounded)
pub const DEFAULT_MAX_DRAIN: usize = 0;

/// Name reported by the tokio main loop executor
pub const MAIN_LOOP_EXECUTOR_NAME: &str = "tokio-main-loop";
