//! Domain layer constants
//!
//! Contains constants shared by the registry and observation layers.
//! Infrastructure-specific constants remain in
//! `stitch_infrastructure::constants`.

// ============================================================================
// OBSERVATION CONSTANTS
// ============================================================================

/// Message reported when a bridge binds to an object without a change signal
pub const NOT_OBSERVABLE_MESSAGE: &str =
    "Cannot observe an object that does not conform to 'ObservableObject'";

/// Field name used when an accessor is registered without one
pub const UNNAMED_FIELD: &str = "<field>";

// ============================================================================
// REGISTRY CONSTANTS
// ============================================================================

/// Initial arena capacity reserved by a fresh dependency map
pub const REGISTRY_INITIAL_CAPACITY: usize = 32;
