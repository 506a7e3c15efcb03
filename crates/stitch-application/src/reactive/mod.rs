#![forbid(unsafe_code)]

//! Change-signal primitives.
//!
//! - [`Subject`]: a passthrough broadcast point with RAII [`Subscription`]s.
//! - [`ObservableObject`]: the capability of publishing a
//!   change-about-to-happen signal.
//! - [`AsObservable`]: runtime capability check used at bind time.
//! - [`Published`]: a property cell that fires its owner's signal before
//!   every write.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. Dropping a [`Subscription`] removes the callback before the next send.
//! 3. [`Published::set`] signals *before* the value is replaced, including
//!    when the new value equals the old one. Suppressing no-op writes is the
//!    job of the field diff publisher, not of the property.

pub mod observable;
pub mod published;
pub mod subject;

pub use observable::{AsObservable, ObjectWillChangePublisher, ObservableObject};
pub use published::Published;
pub use subject::{Subject, Subscription};
