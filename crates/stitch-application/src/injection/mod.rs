//! Injection Accessors
//!
//! Handles that components hold instead of concrete dependencies.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Stitch`] | read/write the current value of a key |
//! | [`StitchObservable`] | deferred "object changed" broadcasts for an observable key |
//! | [`StitchPublished`] | per-field, distinct-until-changed channels |
//! | [`Projection`] | get/set one property of an observed object |
//!
//! ```ignore
//! let store = StitchPublished::<Rc<dyn SomeStore>>::of::<Store>();
//! let property = store.field("property", |s| s.property());
//! let _sub = property.subscribe(|value| println!("property = {value}"));
//! ```

pub mod binding;
pub mod field;
pub mod observable;
pub mod projection;
pub mod published;

pub use binding::Stitch;
pub use field::FieldAccessor;
pub use observable::{ObservationState, StitchObservable};
pub use projection::Projection;
pub use published::{FieldChannel, StitchPublished};
