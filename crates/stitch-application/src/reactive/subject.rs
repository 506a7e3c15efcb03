//! Passthrough subject with RAII subscriptions.
//!
//! # Design
//!
//! [`Subject<T>`] keeps its subscribers in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Each subscriber is held as a `Weak` callback; the
//! strong half lives inside the [`Subscription`] handed back to the caller,
//! so dropping the handle is all it takes to unsubscribe.
//!
//! Unlike a current-value cell, a subject stores nothing: `send` forwards the
//! value to every live subscriber, in registration order, and forgets it.
//!
//! # Failure Modes
//!
//! - **Cancel during send**: callbacks are collected before any of them run,
//!   so a subscription dropped by an earlier callback still receives the
//!   value currently being sent. It receives nothing after that.
//! - **Subscriber leak**: subscriptions stored forever keep their callbacks
//!   alive. Dead weak entries are pruned lazily on `send`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct SubjectInner<T> {
    subscribers: Vec<CallbackWeak<T>>,
    sent: u64,
}

/// A broadcast point that forwards each sent value to its live subscribers.
///
/// Cloning a `Subject` creates a new handle to the same subscriber list.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscribers", &inner.subscribers.len())
            .field("sent", &inner.sent)
            .finish()
    }
}

impl<T: 'static> Subject<T> {
    /// Create a subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                subscribers: Vec::new(),
                sent: 0,
            })),
        }
    }

    /// Forward `value` to every live subscriber in registration order.
    pub fn send(&self, value: &T) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut inner = self.inner.borrow_mut();
            inner.sent += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for callback in callbacks {
            callback(value);
        }
    }

    /// Register `callback` for every future `send`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            guard: Some(Box::new(strong)),
        }
    }

    /// Number of subscribers whose [`Subscription`] is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Total number of values sent through this subject.
    #[must_use]
    pub fn send_count(&self) -> u64 {
        self.inner.borrow().sent
    }
}

/// RAII guard for a subject subscription.
///
/// Dropping the guard (or calling [`Subscription::cancel`]) stops delivery.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    guard: Option<Box<dyn Any>>,
}

impl Subscription {
    /// A subscription that is not attached to anything.
    pub fn empty() -> Self {
        Self { guard: None }
    }

    /// Whether this subscription still keeps a callback alive.
    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }

    /// Stop delivery without dropping the handle.
    pub fn cancel(&mut self) {
        self.guard = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

