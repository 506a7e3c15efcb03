//! Field Diff Publisher
//!
//! Turns the bridge's coarse "object changed" broadcast into per-field
//! channels that only emit when the tracked field actually changed.
//!
//! ## Per round
//!
//! | Accessor result | Tracker state | Outcome |
//! |-----------------|---------------|---------|
//! | no value | any | skip the round |
//! | `v` | unseeded | seed with `v`, no emission |
//! | `v == last` | seeded | suppress |
//! | `v != last` | seeded | store `v`, emit `v` |
//!
//! Every tracked field keeps its own state, so a change to one field never
//! produces an emission on another field's channel.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::binding::Stitch;
use super::field::FieldAccessor;
use super::observable::StitchObservable;
use crate::reactive::{AsObservable, Subject, Subscription};
use crate::registry::{DependencyKey, Stitchable};

struct TrackerState<V> {
    last_observed: RefCell<Option<V>>,
    emitted: Cell<u64>,
}

/// Distinct-until-changed stream of one field
///
/// Holding the channel keeps the upstream bridge alive. Dropping it stops
/// tracking.
pub struct FieldChannel<V: 'static> {
    name: &'static str,
    state: Rc<TrackerState<V>>,
    channel: Subject<V>,
    _upstream: Subscription,
    _bridge: Box<dyn Any>,
}

impl<V: Clone + 'static> FieldChannel<V> {
    /// Receive each new value of the field
    pub fn subscribe(&self, callback: impl Fn(&V) + 'static) -> Subscription {
        self.channel.subscribe(callback)
    }

    /// Last value observed for the field
    pub fn last_value(&self) -> Option<V> {
        self.state.last_observed.borrow().clone()
    }

    /// Field name given to the accessor
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of values emitted so far
    pub fn emission_count(&self) -> u64 {
        self.state.emitted.get()
    }

    /// Whether a baseline value has been observed
    pub fn is_seeded(&self) -> bool {
        self.state.last_observed.borrow().is_some()
    }
}

impl<V: 'static> fmt::Debug for FieldChannel<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChannel")
            .field("name", &self.name)
            .field("emitted", &self.state.emitted.get())
            .finish_non_exhaustive()
    }
}

/// Observable dependency with per-field change channels
pub struct StitchPublished<T: 'static> {
    bridge: StitchObservable<T>,
}

impl<T: 'static> Clone for StitchPublished<T> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
        }
    }
}

impl<T: AsObservable + Clone + 'static> StitchPublished<T> {
    /// Wrap `binding`, binding the underlying bridge immediately
    #[track_caller]
    pub fn new(binding: Stitch<T>) -> Self {
        Self {
            bridge: StitchObservable::new(binding),
        }
    }

    /// Publisher for the key of a stitchable entity
    #[track_caller]
    pub fn of<S: Stitchable<Dependency = T>>() -> Self {
        Self::new(Stitch::of::<S>())
    }

    /// Publisher for a declared key
    #[track_caller]
    pub fn from_key(key: &'static DependencyKey<T>) -> Self {
        Self::new(Stitch::new(key))
    }

    /// Resolve the current value
    pub fn get(&self) -> T {
        self.bridge.get()
    }

    /// Register `value` and rebind the bridge to it
    #[track_caller]
    pub fn set(&self, value: T) {
        self.bridge.set(value);
    }

    /// Underlying observation bridge
    pub fn observable(&self) -> &StitchObservable<T> {
        &self.bridge
    }

    /// Track one field through `accessor`
    ///
    /// The bridge is refreshed first so the baseline comes from the object
    /// currently registered for the key.
    #[track_caller]
    pub fn track<V>(&self, accessor: FieldAccessor<T, V>) -> FieldChannel<V>
    where
        V: PartialEq + Clone + 'static,
    {
        self.bridge.refresh();

        let seed = self
            .bridge
            .bound_object()
            .and_then(|object| accessor.extract(&object));
        let state = Rc::new(TrackerState {
            last_observed: RefCell::new(seed),
            emitted: Cell::new(0),
        });
        let channel = Subject::new();
        let name = accessor.name();

        let upstream = {
            let state = Rc::clone(&state);
            let channel = channel.clone();
            self.bridge.subscribe(move |object| {
                let Some(value) = accessor.extract(object) else {
                    return;
                };
                let changed = {
                    let mut last = state.last_observed.borrow_mut();
                    if last.as_ref() == Some(&value) {
                        None
                    } else {
                        let seeded = last.is_some();
                        *last = Some(value.clone());
                        seeded.then_some(value)
                    }
                };
                if let Some(value) = changed {
                    state.emitted.set(state.emitted.get() + 1);
                    trace!(field = accessor.name(), "field changed");
                    channel.send(&value);
                }
            })
        };

        FieldChannel {
            name,
            state,
            channel,
            _upstream: upstream,
            _bridge: Box::new(self.bridge.clone()),
        }
    }

    /// Track a field through a plain getter
    #[track_caller]
    pub fn field<V>(
        &self,
        name: &'static str,
        getter: impl Fn(&T) -> V + 'static,
    ) -> FieldChannel<V>
    where
        V: PartialEq + Clone + 'static,
    {
        self.track(FieldAccessor::new(name, getter))
    }
}

impl<T: 'static> fmt::Debug for StitchPublished<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StitchPublished")
            .field("bridge", &self.bridge)
            .finish()
    }
}
