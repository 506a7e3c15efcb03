//! # Stitch
//!
//! A typed dependency registry with lifecycle scopes, and a reactive layer
//! that turns an object's generic "about to change" signal into selective,
//! per-field notifications.
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use stitch::prelude::*;
//!
//! #[derive(Default)]
//! struct Counter { /* will_change + Published fields */ }
//!
//! stitchify!(Counter);
//!
//! let counter = StitchPublished::<Rc<Counter>>::of::<Counter>();
//! let count = counter.field("count", |c| c.count.get());
//! let _sub = count.subscribe(|value| println!("count = {value}"));
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, scopes, identities and the executor port
//! - `application` - registry, bindings, observation bridge, field publisher
//! - `infrastructure` - configuration, logging, tokio main loop, bootstrap

/// Domain layer - errors, scopes, identities and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use stitch_domain::*;
}

/// Application layer - the registry and reactive core
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use stitch_application::*;
}

/// Infrastructure layer - config, logging, main loop and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use stitch_infrastructure::*;
}

/// Everything needed to declare, resolve and observe dependencies
pub mod prelude {
    pub use stitch_application::{
        AsObservable, DependencyKey, DependencyMocker, FieldAccessor, FieldChannel, MockScope,
        ObjectWillChangePublisher, ObservableObject, Projection, Published, Stitch,
        StitchObservable, StitchPublished, Stitchable, Subscription, dependency_key, stitchify,
    };
    pub use stitch_domain::Scope;
}

// Re-export commonly used types at the crate root
pub use domain::{ContractViolation, Error, Result, Scope};
pub use stitch_application::{dependency_key, stitchify};
