//! Application Layer - Stitch
//!
//! The runtime core of Stitch: a typed, thread-local dependency registry
//! with lifecycle scopes, and a reactive layer that turns an object's
//! generic "about to change" signal into per-field notifications.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StitchPublished ── FieldChannel (per field, distinct)       │
//! │        │                                                     │
//! │  StitchObservable ── deferred via dispatch::post             │
//! │        │                                                     │
//! │  Stitch<T> (binding)                                         │
//! │        │                                                     │
//! │  registry::lifecycle ── DependencyMap ── DependencyKey<T>    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! The registry, bindings and bridges belong to one coordinating thread.
//! They are built on `Rc`/`RefCell` and are therefore `!Send`. Work from
//! other threads reaches the coordinating thread through the executor it
//! has installed (see `stitch-infrastructure`'s main loop).
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `stitch-domain`: errors, scopes, identities and the executor port
//! - `tracing` for diagnostics and `linkme` for declaration listing

pub mod dispatch;
pub mod injection;
pub mod mocking;
pub mod preconditions;
pub mod reactive;
pub mod registry;
pub mod stitchify;

pub use injection::{
    FieldAccessor, FieldChannel, ObservationState, Projection, Stitch, StitchObservable,
    StitchPublished,
};
pub use mocking::{DependencyMocker, MockScope, Placeholder};
pub use reactive::{
    AsObservable, ObjectWillChangePublisher, ObservableObject, Published, Subject, Subscription,
};
pub use registry::{DependencyKey, DependencyMap, Stitchable};
pub use stitchify::{StitchableEntry, list_stitchables};

#[doc(hidden)]
pub mod __private {
    pub use linkme;
    pub use std::rc::Rc;
    pub use stitch_domain::Scope;
}
