//! Domain Value Objects
//!
//! Immutable value objects shared by the registry and observation layers.
//! Value objects are defined by their attributes and compare by equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Scope`] | Lifecycle policy tag for a declared dependency |
//! | [`KeyId`] | Stable arena index assigned to a declared dependency key |
//! | [`ObjectId`] | Address identity of a bound object |

/// Lifecycle scope tags
pub mod scope;
/// Identity value objects
pub mod identity;

pub use identity::{KeyId, ObjectId};
pub use scope::Scope;
