//! Observable object capability
//!
//! An object is observable when it exposes an `object_will_change` signal
//! that fires immediately before any of its state is mutated. Objects are
//! usually held behind capability trait objects (`Rc<dyn SomeStore>`), so the
//! observation bridge asks for the capability at runtime through
//! [`AsObservable`] instead of requiring it statically.
//!
//! ## Implementing
//!
//! ```ignore
//! struct Counter {
//!     will_change: ObjectWillChangePublisher,
//!     count: Published<u32>,
//! }
//!
//! impl ObservableObject for Counter {
//!     fn object_will_change(&self) -> &ObjectWillChangePublisher {
//!         &self.will_change
//!     }
//! }
//!
//! impl AsObservable for Counter {
//!     fn as_observable(&self) -> Option<&dyn ObservableObject> {
//!         Some(self)
//!     }
//! }
//! ```

use std::rc::Rc;

use super::subject::Subject;

/// Signal fired immediately before an object mutates
pub type ObjectWillChangePublisher = Subject<()>;

/// Objects that announce mutations before they happen
pub trait ObservableObject {
    /// The change-about-to-happen signal
    fn object_will_change(&self) -> &ObjectWillChangePublisher;
}

/// Runtime capability check for [`ObservableObject`]
///
/// The default implementation reports no capability; observable types
/// override it to return themselves.
pub trait AsObservable {
    /// This object as an observable, when it publishes a change signal
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        None
    }
}

impl<T: AsObservable + ?Sized> AsObservable for Rc<T> {
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        (**self).as_observable()
    }
}

impl<T: AsObservable + ?Sized> AsObservable for Box<T> {
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        (**self).as_observable()
    }
}
