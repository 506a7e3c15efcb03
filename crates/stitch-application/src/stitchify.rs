//! Stitchable Generator
//!
//! Declarative generation of dependency declarations. `stitchify!` turns a
//! plain entity into a resolvable dependency; `dependency_key!` declares a
//! standalone key with a default value.
//!
//! ## What `stitchify!` emits
//!
//! ```text
//! stitchify!(Store, by: dyn SomeStore, scope: Unique)
//!        │
//!        ├─ impl Stitchable for Store
//!        │     type Dependency = Rc<dyn SomeStore>
//!        │     const SCOPE = Scope::Unique
//!        │     fn dependency_key()      → static DependencyKey<Rc<dyn SomeStore>>
//!        │     fn create_new_instance() → Rc::new(Store::default())
//!        │
//!        └─ StitchableEntry in the STITCHABLES distributed slice
//! ```
//!
//! The entity must implement `Default`. Without `by:` the dependency type is
//! `Rc<Entity>`; without `scope:` the scope is `Application`.
//!
//! ## Listing declarations
//!
//! Every generated declaration registers a [`StitchableEntry`] at link time,
//! so hosts can enumerate what is declared without a central list:
//!
//! ```ignore
//! for (name, scope) in stitch_application::stitchify::list_stitchables() {
//!     println!("{name} ({scope})");
//! }
//! ```

use stitch_domain::Scope;

/// Link-time record of one generated declaration
#[derive(Debug)]
pub struct StitchableEntry {
    /// Entity type name
    pub name: &'static str,
    /// Capability the entity resolves as
    pub dependency: &'static str,
    /// Declared scope
    pub scope: Scope,
    /// Module the declaration lives in
    pub module_path: &'static str,
}

// Auto-collection via linkme distributed slices - stitchify! submits entries at link time
#[linkme::distributed_slice]
pub static STITCHABLES: [StitchableEntry] = [..];

/// List all declared stitchables as (name, scope), sorted by name
pub fn list_stitchables() -> Vec<(&'static str, Scope)> {
    let mut entries: Vec<(&'static str, Scope)> =
        STITCHABLES.iter().map(|e| (e.name, e.scope)).collect();
    entries.sort_by_key(|(name, _)| *name);
    entries
}

/// Find a declared stitchable by entity name
pub fn find_stitchable(name: &str) -> Option<&'static StitchableEntry> {
    STITCHABLES.iter().find(|e| e.name == name)
}

/// Declare an entity as a resolvable dependency
///
/// ```ignore
/// #[derive(Default)]
/// struct Store { /* ... */ }
///
/// stitchify!(Store, by: dyn SomeStore);
///
/// let store: Rc<dyn SomeStore> = <Store as Stitchable>::resolve();
/// ```
#[macro_export]
macro_rules! stitchify {
    (@scope []) => {
        $crate::__private::Scope::Application
    };
    (@scope [$scope:ident]) => {
        $crate::__private::Scope::$scope
    };
    (@emit $entity:ident, $dependency:ty, $label:expr, [$($scope:ident)?]) => {
        impl $crate::registry::Stitchable for $entity {
            type Dependency = $dependency;

            const SCOPE: $crate::__private::Scope = $crate::stitchify!(@scope [$($scope)?]);

            fn dependency_key() -> &'static $crate::registry::DependencyKey<$dependency> {
                static KEY: $crate::registry::DependencyKey<$dependency> =
                    $crate::registry::DependencyKey::scoped(
                        ::core::stringify!($entity),
                        $crate::stitchify!(@scope [$($scope)?]),
                        <$entity as $crate::registry::Stitchable>::create_new_instance,
                    );
                &KEY
            }

            fn create_new_instance() -> $dependency {
                $crate::__private::Rc::new(<$entity as ::core::default::Default>::default())
            }
        }

        const _: () = {
            #[$crate::__private::linkme::distributed_slice($crate::stitchify::STITCHABLES)]
            #[linkme(crate = $crate::__private::linkme)]
            static ENTRY: $crate::stitchify::StitchableEntry = $crate::stitchify::StitchableEntry {
                name: ::core::stringify!($entity),
                dependency: $label,
                scope: $crate::stitchify!(@scope [$($scope)?]),
                module_path: ::core::module_path!(),
            };
        };
    };
    ($entity:ident $(, scope: $scope:ident)? $(,)?) => {
        $crate::stitchify!(
            @emit $entity,
            $crate::__private::Rc<$entity>,
            ::core::stringify!($entity),
            [$($scope)?]
        );
    };
    ($entity:ident, by: $capability:ty $(, scope: $scope:ident)? $(,)?) => {
        $crate::stitchify!(
            @emit $entity,
            $crate::__private::Rc<$capability>,
            ::core::stringify!($capability),
            [$($scope)?]
        );
    };
}

/// Declare standalone dependency keys with default values
///
/// ```ignore
/// dependency_key! {
///     pub static GREETING: String = String::from("hello");
///     static REQUEST_ID: u64 = next_id(), scope: Unique;
/// }
/// ```
#[macro_export]
macro_rules! dependency_key {
    ($(
        $(#[$meta:meta])*
        $vis:vis static $name:ident : $ty:ty = $default:expr $(, scope: $scope:ident)?;
    )*) => {
        $(
            $(#[$meta])*
            $vis static $name: $crate::registry::DependencyKey<$ty> =
                $crate::registry::DependencyKey::scoped(
                    ::core::stringify!($name),
                    $crate::stitchify!(@scope [$($scope)?]),
                    {
                        fn __default() -> $ty {
                            $default
                        }
                        __default
                    },
                );
        )*
    };
}
