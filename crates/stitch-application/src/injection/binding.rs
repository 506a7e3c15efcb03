//! Typed accessor for one dependency key

use std::fmt;

use stitch_domain::Scope;

use crate::registry::{DependencyKey, Stitchable, lifecycle};

/// Read/write handle to the current value of a key
///
/// A binding stores only the key. Every `get` goes back to the registry, so
/// a `set` through any binding is visible to all bindings of the same key.
pub struct Stitch<T: 'static> {
    key: &'static DependencyKey<T>,
}

impl<T: 'static> Clone for Stitch<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Stitch<T> {}

impl<T: 'static> Stitch<T> {
    /// Bind to `key`
    pub const fn new(key: &'static DependencyKey<T>) -> Self {
        Self { key }
    }

    /// Bind to the storage key of a stitchable entity
    pub fn of<S: Stitchable<Dependency = T>>() -> Self {
        Self::new(S::dependency_key())
    }

    /// Replace the current value of the key
    pub fn set(&self, value: T) {
        lifecycle::register(self.key, value);
    }

    /// Bound key
    pub fn key(&self) -> &'static DependencyKey<T> {
        self.key
    }

    /// Scope of the bound key
    pub fn scope(&self) -> Scope {
        self.key.scope()
    }
}

impl<T: Clone + 'static> Stitch<T> {
    /// Resolve the current value according to the key's scope
    pub fn get(&self) -> T {
        lifecycle::resolve(self.key)
    }
}

impl<T: 'static> fmt::Debug for Stitch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stitch").field("key", &self.key.name()).finish()
    }
}
