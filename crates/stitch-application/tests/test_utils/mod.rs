//! Shared fixtures for stitch-application tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use stitch_application::{
    AsObservable, ObjectWillChangePublisher, ObservableObject, Published, Subscription,
};
use stitch_domain::ObjectId;

/// Observable object with two string fields and an optional one
pub struct TestObservable {
    will_change: ObjectWillChangePublisher,
    pub f: Published<String>,
    pub g: Published<String>,
    pub nickname: Published<Option<String>>,
}

impl TestObservable {
    pub fn new(f: &str, g: &str) -> Self {
        let will_change = ObjectWillChangePublisher::new();
        Self {
            f: Published::new(f.to_owned(), &will_change),
            g: Published::new(g.to_owned(), &will_change),
            nickname: Published::new(None, &will_change),
            will_change,
        }
    }

    pub fn shared(f: &str, g: &str) -> Rc<Self> {
        Rc::new(Self::new(f, g))
    }

    /// Live subscribers on this object's change signal
    pub fn observer_count(&self) -> usize {
        self.will_change.subscriber_count()
    }

    pub fn id(&self) -> ObjectId {
        ObjectId::of(self)
    }
}

impl Default for TestObservable {
    fn default() -> Self {
        Self::new("a", "x")
    }
}

impl ObservableObject for TestObservable {
    fn object_will_change(&self) -> &ObjectWillChangePublisher {
        &self.will_change
    }
}

impl AsObservable for TestObservable {
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        Some(self)
    }
}

/// Object without a change signal
#[derive(Debug, Default)]
pub struct TestObject {
    pub value: Cell<u32>,
}

impl AsObservable for TestObject {}

/// Collects every value a subscription receives
pub struct Recorder<T> {
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            values: Rc::default(),
        }
    }

    /// Callback that appends to this recorder
    pub fn sink(&self) -> impl Fn(&T) + 'static {
        let values = Rc::clone(&self.values);
        move |value: &T| values.borrow_mut().push(value.clone())
    }

    pub fn values(&self) -> Vec<T> {
        self.values.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }
}

/// Keeps subscriptions alive for the duration of a test
pub type Subscriptions = Vec<Subscription>;
