//! Dependency key descriptors

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use stitch_domain::{KeyId, Scope};

static NEXT_KEY_ID: AtomicU32 = AtomicU32::new(0);

/// Declared identity of a dependency
///
/// A key carries everything the registry needs to produce a value without
/// any prior registration: a name for diagnostics, the lifecycle [`Scope`]
/// and the factory that builds the default value. Keys are declared as
/// statics, so "key not found" cannot happen at runtime.
///
/// ```ignore
/// static CLOCK: DependencyKey<Rc<dyn Clock>> =
///     DependencyKey::new("clock", || Rc::new(SystemClock));
/// ```
pub struct DependencyKey<T: 'static> {
    name: &'static str,
    scope: Scope,
    factory: fn() -> T,
    id: OnceLock<KeyId>,
}

impl<T: 'static> DependencyKey<T> {
    /// Declare an application-scoped key
    pub const fn new(name: &'static str, factory: fn() -> T) -> Self {
        Self::scoped(name, Scope::Application, factory)
    }

    /// Declare a key with an explicit scope
    pub const fn scoped(name: &'static str, scope: Scope, factory: fn() -> T) -> Self {
        Self {
            name,
            scope,
            factory,
            id: OnceLock::new(),
        }
    }

    /// Stable arena index of this key, assigned on first use
    pub fn id(&self) -> KeyId {
        *self
            .id
            .get_or_init(|| KeyId::new(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed)))
    }

    /// Declared name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Lifecycle scope
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Build a fresh default value
    pub fn make_default(&self) -> T {
        (self.factory)()
    }
}

impl<T: 'static> fmt::Debug for DependencyKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyKey")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("id", &self.id.get())
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
