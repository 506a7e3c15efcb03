//! Observation bridge: binding, deferred delivery and rebinding

use std::rc::Rc;

use stitch_application::dispatch::drain_main_queue;
use stitch_application::preconditions::expect_violation;
use stitch_application::{ObservationState, Stitch, StitchObservable, dependency_key};
use stitch_domain::constants::NOT_OBSERVABLE_MESSAGE;

use crate::test_utils::{Recorder, TestObject, TestObservable};

dependency_key! {
    static STORE: Rc<TestObservable> = TestObservable::shared("a", "x");
    static PLAIN: Rc<TestObject> = Rc::new(TestObject::default());
    static FRESH: Rc<TestObservable> = TestObservable::shared("a", "x"), scope: Unique;
}

#[test]
fn test_bridge_binds_to_the_current_object() {
    let store = Stitch::new(&STORE).get();

    let bridge = StitchObservable::from_key(&STORE);

    assert!(bridge.is_bound());
    assert_eq!(bridge.state(), ObservationState::Bound { object: store.id() });
    assert_eq!(store.observer_count(), 1);
    assert_eq!(bridge.generation(), 1);
}

#[test]
fn test_delivery_is_deferred_until_after_the_mutation() {
    let bridge = StitchObservable::from_key(&STORE);
    let recorder = Recorder::new();
    let _subscription = bridge.subscribe({
        let sink = recorder.sink();
        move |store: &Rc<TestObservable>| sink(&store.f.get())
    });

    bridge.get().f.set("b".to_owned());
    assert_eq!(recorder.len(), 0);

    assert_eq!(drain_main_queue(), 1);
    assert_eq!(recorder.values(), vec!["b".to_owned()]);
}

#[test]
fn test_each_signal_is_delivered_once() {
    let bridge = StitchObservable::from_key(&STORE);
    let recorder = Recorder::<Rc<TestObservable>>::new();
    let _subscription = bridge.subscribe(recorder.sink());

    let store = bridge.get();
    store.f.set("b".to_owned());
    store.g.set("y".to_owned());
    drain_main_queue();

    assert_eq!(recorder.len(), 2);
    assert!(Rc::ptr_eq(&recorder.values()[0], &store));
}

#[test]
fn test_non_observable_object_is_reported_once_at_bind_time() {
    let line = line!() + 1;
    let (bridge, violations) = expect_violation(|| StitchObservable::from_key(&PLAIN));

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, NOT_OBSERVABLE_MESSAGE);
    assert_eq!(violations[0].location.file(), file!());
    assert_eq!(violations[0].location.line(), line);
    assert_eq!(bridge.state(), ObservationState::Unbound);

    let ((), later) = expect_violation(|| {
        bridge.get().value.set(1);
        drain_main_queue();
    });
    assert!(later.is_empty());
}

#[test]
#[should_panic(expected = "does not conform to 'ObservableObject'")]
fn test_non_observable_object_is_fatal_by_default() {
    let _bridge = StitchObservable::from_key(&PLAIN);
}

#[test]
fn test_set_rebinds_to_the_new_object() {
    let bridge = StitchObservable::from_key(&STORE);
    let recorder = Recorder::<Rc<TestObservable>>::new();
    let _subscription = bridge.subscribe(recorder.sink());
    let old = bridge.get();
    let new = TestObservable::shared("n", "x");

    bridge.set(Rc::clone(&new));

    assert_eq!(old.observer_count(), 0);
    assert_eq!(new.observer_count(), 1);
    assert_eq!(bridge.state(), ObservationState::Bound { object: new.id() });

    old.f.set("ignored".to_owned());
    drain_main_queue();
    assert_eq!(recorder.len(), 0);

    new.f.set("seen".to_owned());
    drain_main_queue();
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_signal_from_replaced_subscription_is_dropped() {
    let bridge = StitchObservable::from_key(&STORE);
    let recorder = Recorder::<Rc<TestObservable>>::new();
    let _subscription = bridge.subscribe(recorder.sink());

    bridge.get().f.set("before rebind".to_owned());
    assert!(bridge.observe());
    assert_eq!(drain_main_queue(), 1);

    assert_eq!(recorder.len(), 0);
    assert_eq!(bridge.generation(), 2);
}

#[test]
fn test_refresh_keeps_binding_when_object_is_unchanged() {
    let bridge = StitchObservable::from_key(&STORE);

    assert!(bridge.refresh());

    assert_eq!(bridge.generation(), 1);
}

#[test]
fn test_refresh_of_an_unbound_bridge_does_not_report_again() {
    let (bridge, violations) = expect_violation(|| StitchObservable::from_key(&PLAIN));
    assert_eq!(violations.len(), 1);

    let (refreshed, later) = expect_violation(|| bridge.refresh());

    assert!(!refreshed);
    assert!(later.is_empty());
    assert_eq!(bridge.generation(), 1);
}

#[test]
fn test_refresh_follows_a_register_made_elsewhere() {
    let bridge = StitchObservable::from_key(&STORE);
    let replacement = TestObservable::shared("r", "x");

    Stitch::new(&STORE).set(Rc::clone(&replacement));
    assert!(bridge.refresh());

    assert_eq!(bridge.generation(), 2);
    assert!(Rc::ptr_eq(&bridge.bound_object().expect("bound"), &replacement));
}

#[test]
fn test_dropping_the_bridge_unsubscribes_and_discards_pending_work() {
    let bridge = StitchObservable::from_key(&STORE);
    let store = bridge.get();

    store.f.set("b".to_owned());
    drop(bridge);

    assert_eq!(store.observer_count(), 0);
    assert_eq!(drain_main_queue(), 1);
}

#[test]
fn test_clones_share_one_subscription() {
    let bridge = StitchObservable::from_key(&STORE);
    let clone = bridge.clone();
    let recorder = Recorder::<Rc<TestObservable>>::new();
    let _subscription = clone.subscribe(recorder.sink());

    bridge.get().g.set("y".to_owned());
    drain_main_queue();

    assert_eq!(bridge.get().observer_count(), 1);
    assert_eq!(bridge.downstream_count(), 1);
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_unique_binding_observes_the_instance_built_at_bind_time() {
    let bridge = StitchObservable::from_key(&FRESH);
    let bound = bridge.bound_object().expect("bound");

    assert!(!Rc::ptr_eq(&bound, &bridge.get()));
    assert_eq!(bound.observer_count(), 1);
}

#[test]
fn test_debug_reports_key_and_generation() {
    let bridge = StitchObservable::from_key(&STORE);

    let rendered = format!("{bridge:?}");

    assert!(rendered.contains("\"STORE\""));
    assert!(rendered.contains("generation: 1"));
}

#[test]
fn test_projection_reads_and_writes_the_bound_object() {
    let bridge = StitchObservable::from_key(&STORE);
    let f = bridge.project("f", |store| store.f.get(), |store, value| store.f.set(value));
    let recorder = Recorder::new();
    let _subscription = bridge.subscribe(recorder.sink());

    f.set("b".to_owned());

    assert_eq!(f.get(), "b");
    assert_eq!(bridge.get().f.get(), "b");
    assert_eq!(recorder.len(), 0);
    drain_main_queue();
    assert_eq!(recorder.len(), 1);
    assert_eq!(f.name(), "f");
}

#[test]
fn test_projection_follows_the_bridge_after_set() {
    let bridge = StitchObservable::from_key(&STORE);
    let g = bridge.project("g", |store| store.g.get(), |store, value| store.g.set(value));
    let old = bridge.get();
    let replacement = TestObservable::shared("a", "replacement");

    bridge.set(Rc::clone(&replacement));
    g.clone().set("written".to_owned());

    assert_eq!(g.get(), "written");
    assert_eq!(replacement.g.get(), "written");
    assert_eq!(old.g.get(), "x");
}
