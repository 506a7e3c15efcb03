//! Mock Registrar
//!
//! Helpers for tests and previews that overwrite registry entries.
//!
//! - [`mock`] overwrites an entry for the rest of the thread's life.
//! - [`DependencyMocker::mock_in_view_scope`] does the same and returns an
//!   inert [`Placeholder`] so it can sit inside declarative composition.
//! - [`MockScope`] records what it overwrote and restores it on drop.
//!
//! Overwriting a key that was already resolved is allowed but logged: the
//! resolved value may have been captured by components that will not see the
//! mock.

use std::fmt;

use tracing::{debug, warn};

use crate::registry::{DependencyKey, DependencyMap, SavedSlot, Stitchable};

/// Inert value returned by view-scoped mocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholder;

fn warn_if_resolved<T: 'static>(key: &DependencyKey<T>) {
    let resolves = DependencyMap::resolve_count(key);
    if resolves > 0 {
        warn!(
            key = key.name(),
            resolves, "mocking a dependency that was already resolved"
        );
    }
}

/// Overwrite the current value of `key`
pub fn mock<T: 'static>(key: &DependencyKey<T>, value: T) {
    warn_if_resolved(key);
    debug!(key = key.name(), "mocking dependency");
    DependencyMap::register(key, value);
}

/// Mocking entry points for test and preview hosts
///
/// Every method has a default implementation; implement the trait on a test
/// fixture or preview type with an empty `impl` block.
pub trait DependencyMocker {
    /// Overwrite the current value of `key`
    fn mock<T: 'static>(&self, key: &DependencyKey<T>, value: T) {
        mock(key, value);
    }

    /// Overwrite `key` and return an inert placeholder
    fn mock_in_view_scope<T: 'static>(&self, key: &DependencyKey<T>, value: T) -> Placeholder {
        mock(key, value);
        Placeholder
    }

    /// Overwrite the shared instance of a stitchable entity
    fn mock_stitchable<S: Stitchable>(&self, dependency: S::Dependency) {
        mock(S::dependency_key(), dependency);
    }
}

/// Overwrites that are undone when the scope is dropped
///
/// Entries are restored in reverse order, so mocking the same key twice
/// restores the value from before the first mock.
#[must_use = "dropping a MockScope immediately restores the mocked entries"]
#[derive(Default)]
pub struct MockScope {
    saved: Vec<SavedSlot>,
}

impl MockScope {
    /// Start an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `key` until this scope is dropped
    pub fn mock<T: 'static>(&mut self, key: &DependencyKey<T>, value: T) -> &mut Self {
        warn_if_resolved(key);
        debug!(key = key.name(), "mocking dependency in scope");
        self.saved.push(DependencyMap::replace_slot(key, value));
        self
    }

    /// Overwrite a stitchable entity until this scope is dropped
    pub fn mock_stitchable<S: Stitchable>(&mut self, dependency: S::Dependency) -> &mut Self {
        self.mock(S::dependency_key(), dependency)
    }

    /// Number of overwrites recorded
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Whether nothing was overwritten
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for MockScope {
    fn drop(&mut self) {
        let restored = self.saved.len();
        while let Some(saved) = self.saved.pop() {
            DependencyMap::restore_slot(saved);
        }
        if restored > 0 {
            debug!(restored, "restored mocked dependencies");
        }
    }
}

impl fmt::Debug for MockScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockScope")
            .field("saved", &self.saved)
            .finish()
    }
}
