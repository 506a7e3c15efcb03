//! Scope-aware resolution
//!
//! | Scope | `resolve` | `invalidate` |
//! |-------|-----------|--------------|
//! | `Application` | memoised in the map | no-op |
//! | `Cached` | memoised in the map | drops the memo |
//! | `Unique` | factory on every call | no-op |

use stitch_domain::Scope;
use tracing::{debug, trace};

use super::key::DependencyKey;
use super::map::DependencyMap;

/// Resolve `key` according to its scope
pub fn resolve<T: Clone + 'static>(key: &DependencyKey<T>) -> T {
    match key.scope() {
        Scope::Application | Scope::Cached => DependencyMap::resolve(key),
        Scope::Unique => {
            trace!(key = key.name(), "constructing unique instance");
            DependencyMap::record_resolution(key);
            key.make_default()
        }
    }
}

/// Register `value` as the current value of `key`
///
/// Unique keys never consult the map, so the value is stored but not
/// observed by later resolutions.
pub fn register<T: 'static>(key: &DependencyKey<T>, value: T) {
    if key.scope() == Scope::Unique {
        debug!(key = key.name(), "registered value is ignored by unique resolution");
    }
    DependencyMap::register(key, value);
}

/// Drop the memoised instance of a cached key
///
/// Returns `true` when an instance was dropped. Other scopes are left
/// untouched.
pub fn invalidate<T: 'static>(key: &DependencyKey<T>) -> bool {
    match key.scope() {
        Scope::Cached => {
            let dropped = DependencyMap::remove(key);
            debug!(key = key.name(), dropped, "invalidated cached dependency");
            dropped
        }
        scope => {
            debug!(key = key.name(), %scope, "invalidate ignored for non-cached scope");
            false
        }
    }
}
