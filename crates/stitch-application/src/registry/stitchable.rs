//! Resolvable entity contract
//!
//! Implemented by the `stitchify!` generator; hand-written impls are
//! possible but the generated form keeps the key, scope and constructor in
//! agreement.

use stitch_domain::Scope;

use super::key::DependencyKey;
use super::lifecycle;
use super::map::DependencyMap;

/// An entity that can be resolved from the dependency registry
pub trait Stitchable: 'static {
    /// Type handed out by resolution, usually `Rc<Self>` or `Rc<dyn Capability>`
    type Dependency: Clone + 'static;

    /// Lifecycle scope of the entity
    const SCOPE: Scope;

    /// Storage key for the shared instance
    fn dependency_key() -> &'static DependencyKey<Self::Dependency>;

    /// Construct a new instance, bypassing the registry
    fn create_new_instance() -> Self::Dependency;

    /// Resolve according to [`Self::SCOPE`]
    fn resolve() -> Self::Dependency {
        match Self::SCOPE {
            Scope::Unique => Self::create_new_instance(),
            Scope::Application | Scope::Cached => DependencyMap::resolve(Self::dependency_key()),
        }
    }

    /// Replace the shared instance
    fn register(dependency: Self::Dependency) {
        lifecycle::register(Self::dependency_key(), dependency);
    }

    /// Drop the memoised instance when the entity is cached
    fn invalidate() -> bool {
        lifecycle::invalidate(Self::dependency_key())
    }
}

/// Resolve `S` by type
pub fn resolve<S: Stitchable>() -> S::Dependency {
    S::resolve()
}

/// Register a replacement for `S` by type
pub fn register<S: Stitchable>(dependency: S::Dependency) {
    S::register(dependency);
}
