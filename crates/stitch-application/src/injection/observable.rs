//! Observation Bridge
//!
//! Wraps a [`Stitch`] binding and forwards the bound object's
//! change-about-to-happen signal as a deferred "object changed" broadcast.
//!
//! ## State machine
//!
//! ```text
//!            observe() ok                    observe() / set()
//! Unbound ──────────────► Bound(sub, id) ──────────────────► Bound(sub', id')
//!    ▲                         │
//!    └──── observe() on an ────┘
//!          object without a
//!          change signal (violation reported)
//! ```
//!
//! ## Delivery
//!
//! The raw signal fires before the object mutates. The bridge never forwards
//! it inline: each emission posts one task to the coordinating executor
//! ([`crate::dispatch`]), and the task broadcasts the bound object once the
//! mutation has completed. Tasks posted by a subscription that has since been
//! replaced are discarded, so a rebind never leaks deliveries from the old
//! object.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use stitch_domain::ObjectId;
use stitch_domain::constants::NOT_OBSERVABLE_MESSAGE;
use tracing::{debug, trace};

use super::binding::Stitch;
use super::projection::Projection;
use crate::dispatch;
use crate::preconditions;
use crate::reactive::{AsObservable, Subject, Subscription};
use crate::registry::{DependencyKey, Stitchable};

/// Public view of a bridge's binding state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationState {
    /// No live subscription
    Unbound,
    /// Subscribed to the object with this identity
    Bound {
        /// Identity of the bound object
        object: ObjectId,
    },
}

enum BridgeState<T> {
    Unbound,
    Bound {
        object: T,
        identity: ObjectId,
        _subscription: Subscription,
    },
}

struct BridgeInner<T: 'static> {
    binding: Stitch<T>,
    state: RefCell<BridgeState<T>>,
    did_change: Subject<T>,
    generation: Cell<u64>,
}

impl<T: Clone + 'static> BridgeInner<T> {
    fn deliver(&self, generation: u64) {
        if generation != self.generation.get() {
            trace!(
                key = self.binding.key().name(),
                generation,
                "dropping delivery from replaced subscription"
            );
            return;
        }
        let object = match &*self.state.borrow() {
            BridgeState::Bound { object, .. } => object.clone(),
            BridgeState::Unbound => return,
        };
        trace!(key = self.binding.key().name(), "delivering object change");
        self.did_change.send(&object);
    }
}

/// Deferred change forwarder for an observable dependency
///
/// Cloning shares the same bridge.
pub struct StitchObservable<T: 'static> {
    inner: Rc<BridgeInner<T>>,
}

impl<T: 'static> Clone for StitchObservable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: AsObservable + Clone + 'static> StitchObservable<T> {
    /// Wrap `binding` and bind to its current object
    ///
    /// The capability check runs here: an object without a change signal is
    /// reported through [`preconditions`] immediately.
    #[track_caller]
    pub fn new(binding: Stitch<T>) -> Self {
        let bridge = Self {
            inner: Rc::new(BridgeInner {
                binding,
                state: RefCell::new(BridgeState::Unbound),
                did_change: Subject::new(),
                generation: Cell::new(0),
            }),
        };
        bridge.observe();
        bridge
    }

    /// Bridge for the key of a stitchable entity
    #[track_caller]
    pub fn of<S: Stitchable<Dependency = T>>() -> Self {
        Self::new(Stitch::of::<S>())
    }

    /// Bridge for a declared key
    #[track_caller]
    pub fn from_key(key: &'static DependencyKey<T>) -> Self {
        Self::new(Stitch::new(key))
    }

    /// Resolve the current object and (re)subscribe to its change signal
    ///
    /// Any previous subscription is torn down first. Returns `false` when the
    /// object is not observable; the bridge then stays unbound.
    #[track_caller]
    pub fn observe(&self) -> bool {
        let inner = &self.inner;
        let object = inner.binding.get();

        let previous = inner.state.replace(BridgeState::Unbound);
        drop(previous);
        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);

        let Some(observable) = object.as_observable() else {
            preconditions::precondition(false, || NOT_OBSERVABLE_MESSAGE.to_owned());
            return false;
        };
        let identity = ObjectId::of(observable);
        let weak: Weak<BridgeInner<T>> = Rc::downgrade(inner);
        let subscription = observable.object_will_change().subscribe(move |_: &()| {
            let weak = weak.clone();
            dispatch::post(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.deliver(generation);
                }
            });
        });

        debug!(
            key = inner.binding.key().name(),
            object = %identity,
            generation,
            "bound observation bridge"
        );
        *inner.state.borrow_mut() = BridgeState::Bound {
            object,
            identity,
            _subscription: subscription,
        };
        true
    }

    /// Rebind only when the binding now resolves to a different object
    ///
    /// An unbound bridge whose key still resolves to an object without a
    /// change signal stays unbound without reporting again; the violation
    /// belongs to the bind that failed.
    #[track_caller]
    pub fn refresh(&self) -> bool {
        let current = self.inner.binding.get();
        let resolved = current.as_observable().map(ObjectId::of);
        match (self.state(), resolved) {
            (ObservationState::Bound { object }, Some(identity)) if object == identity => true,
            (ObservationState::Unbound, None) => false,
            _ => self.observe(),
        }
    }

    /// Register `value` through the binding and re-observe
    #[track_caller]
    pub fn set(&self, value: T) {
        self.inner.binding.set(value);
        self.observe();
    }

    /// Resolve the current value through the binding
    pub fn get(&self) -> T {
        self.inner.binding.get()
    }

    /// Object the live subscription belongs to
    pub fn bound_object(&self) -> Option<T> {
        match &*self.inner.state.borrow() {
            BridgeState::Bound { object, .. } => Some(object.clone()),
            BridgeState::Unbound => None,
        }
    }

    /// Current binding state
    pub fn state(&self) -> ObservationState {
        match &*self.inner.state.borrow() {
            BridgeState::Bound { identity, .. } => ObservationState::Bound { object: *identity },
            BridgeState::Unbound => ObservationState::Unbound,
        }
    }

    /// Whether a subscription is live
    pub fn is_bound(&self) -> bool {
        matches!(self.state(), ObservationState::Bound { .. })
    }

    /// Receive the bound object after every change
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.did_change.subscribe(callback)
    }

    /// Number of live downstream subscribers
    pub fn downstream_count(&self) -> usize {
        self.inner.did_change.subscriber_count()
    }

    /// Number of bind attempts so far
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// Underlying binding
    pub fn binding(&self) -> Stitch<T> {
        self.inner.binding
    }

    /// Two-way view of one property of the current object
    pub fn project<V: 'static>(
        &self,
        name: &'static str,
        getter: impl Fn(&T) -> V + 'static,
        setter: impl Fn(&T, V) + 'static,
    ) -> Projection<T, V> {
        Projection::new(self.clone(), name, getter, setter)
    }
}

impl<T: 'static> fmt::Debug for StitchObservable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = matches!(&*self.inner.state.borrow(), BridgeState::Bound { .. });
        f.debug_struct("StitchObservable")
            .field("key", &self.inner.binding.key().name())
            .field("bound", &bound)
            .field("generation", &self.inner.generation.get())
            .finish()
    }
}
