//! Published property cell

use std::cell::RefCell;
use std::fmt;

use super::observable::ObjectWillChangePublisher;

/// A property that fires its owner's change signal before every write
///
/// The cell shares the owner's [`ObjectWillChangePublisher`], so any write
/// through any `Published` field of an object announces a change on the
/// object as a whole. Readers subscribed synchronously to the signal still see
/// the old value; readers reached through a deferred delivery see the new one.
pub struct Published<T> {
    value: RefCell<T>,
    will_change: ObjectWillChangePublisher,
}

impl<T: Clone> Published<T> {
    /// Create a property announcing writes on `will_change`
    pub fn new(value: T, will_change: &ObjectWillChangePublisher) -> Self {
        Self {
            value: RefCell::new(value),
            will_change: will_change.clone(),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Borrow the current value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Signal, then replace the value
    pub fn set(&self, value: T) {
        self.will_change.send(&());
        *self.value.borrow_mut() = value;
    }

    /// Signal, then mutate the value in place
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.will_change.send(&());
        f(&mut self.value.borrow_mut());
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Published").field(&self.value.borrow()).finish()
    }
}
