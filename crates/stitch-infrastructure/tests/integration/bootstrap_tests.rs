//! Bootstrap: executor and hook installation, drain, end-to-end delivery

use std::cell::RefCell;
use std::rc::Rc;

use stitch_application::dispatch;
use stitch_application::preconditions::{self, precondition};
use stitch_application::{
    AsObservable, DependencyKey, ObjectWillChangePublisher, ObservableObject, Published,
    StitchPublished,
};
use stitch_domain::{ContractViolation, MainExecutor};
use stitch_infrastructure::config::{
    AppConfig, ConfigBuilder, DispatchConfig, ExecutorKind, LoggingConfig, PreconditionsConfig,
};
use stitch_infrastructure::constants::MAIN_LOOP_EXECUTOR_NAME;
use stitch_infrastructure::{StitchContext, bootstrap};

struct Thermostat {
    will_change: ObjectWillChangePublisher,
    target: Published<u32>,
    label: Published<String>,
}

impl Default for Thermostat {
    fn default() -> Self {
        let will_change = ObjectWillChangePublisher::new();
        Self {
            target: Published::new(20, &will_change),
            label: Published::new("hall".to_owned(), &will_change),
            will_change,
        }
    }
}

impl ObservableObject for Thermostat {
    fn object_will_change(&self) -> &ObjectWillChangePublisher {
        &self.will_change
    }
}

impl AsObservable for Thermostat {
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        Some(self)
    }
}

static THERMOSTAT: DependencyKey<Rc<Thermostat>> =
    DependencyKey::new("thermostat", || Rc::new(Thermostat::default()));

fn context_with(dispatch: DispatchConfig) -> StitchContext {
    let config = ConfigBuilder::new().with_dispatch(dispatch).build().unwrap();
    bootstrap::init(config).unwrap()
}

#[test]
fn test_queue_config_installs_a_task_queue() {
    let context = context_with(DispatchConfig::queue());

    assert_eq!(context.executor_name(), "task-queue");
    assert_eq!(dispatch::current().name(), "task-queue");
    assert!(context.main_loop().is_none());
    assert!(context.handle().is_none());
}

#[test]
fn test_tokio_config_installs_the_main_loop() {
    let context = context_with(DispatchConfig::tokio());

    assert_eq!(context.executor_name(), MAIN_LOOP_EXECUTOR_NAME);
    assert_eq!(dispatch::current().name(), MAIN_LOOP_EXECUTOR_NAME);
    assert!(context.main_loop().is_some());
    assert!(context.handle().is_some_and(|handle| !handle.is_closed()));
}

#[test]
fn test_drop_restores_the_previous_executor() {
    let outer = context_with(DispatchConfig::queue());
    {
        let _inner = context_with(DispatchConfig::tokio());
        assert_eq!(dispatch::current().name(), MAIN_LOOP_EXECUTOR_NAME);
    }
    dispatch::post(|| {});

    assert_eq!(outer.pending(), 1);
    drop(outer);
    assert_eq!(dispatch::main_queue().pending(), 0);
}

#[test]
fn test_drain_honors_max_drain() {
    let context = context_with(DispatchConfig {
        executor: ExecutorKind::Queue,
        max_drain: 1,
    });
    dispatch::post(|| {});
    dispatch::post(|| {});

    assert_eq!(context.drain(), 1);
    assert_eq!(context.pending(), 1);
    assert_eq!(context.drain(), 1);
}

#[test]
fn test_lenient_preconditions_log_instead_of_panicking() {
    let config = ConfigBuilder::new()
        .with_preconditions(PreconditionsConfig { fatal: false })
        .build()
        .unwrap();
    let _context = bootstrap::init(config).unwrap();

    assert!(!precondition(false, || "tolerated".to_owned()));
}

#[test]
fn test_drop_restores_the_previous_hook() {
    let captured: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&captured);
    preconditions::set_hook(move |violation: &ContractViolation| {
        sink.borrow_mut().push(violation.message.clone());
    });

    let context = bootstrap::init(AppConfig::default()).unwrap();
    drop(context);
    precondition(false, || "after release".to_owned());

    assert_eq!(*captured.borrow(), vec!["after release".to_owned()]);
    preconditions::reset_hook();
}

#[test]
#[should_panic(expected = "Contract violation")]
fn test_fatal_preconditions_panic() {
    preconditions::set_hook(preconditions::logging_hook);
    let _context = bootstrap::init(AppConfig::default()).unwrap();

    precondition(false, || "fatal".to_owned());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.logging = LoggingConfig {
        level: "loud".to_owned(),
        ..LoggingConfig::default()
    };

    assert!(bootstrap::init(config).is_err());
    assert_eq!(dispatch::current().name(), "task-queue");
}

#[test]
fn test_field_changes_flow_through_the_queue_context() {
    let context = context_with(DispatchConfig::queue());
    let published = StitchPublished::from_key(&THERMOSTAT);
    let target = published.field("target", |t: &Rc<Thermostat>| t.target.get());
    let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
    let _subscription = {
        let seen = Rc::clone(&seen);
        target.subscribe(move |value| seen.borrow_mut().push(*value))
    };

    let thermostat = published.get();
    thermostat.label.set("kitchen".to_owned());
    thermostat.target.set(22);
    assert_eq!(context.pending(), 2);
    context.drain();

    assert_eq!(*seen.borrow(), vec![22]);
}

#[tokio::test]
async fn test_field_changes_flow_through_the_main_loop() {
    let context = context_with(DispatchConfig::tokio());
    let main_loop = context.main_loop().unwrap();
    let handle = context.handle().unwrap();
    let published = StitchPublished::from_key(&THERMOSTAT);
    let label = published.field("label", |t: &Rc<Thermostat>| t.label.get());
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let _subscription = {
        let seen = Rc::clone(&seen);
        label.subscribe(move |value| seen.borrow_mut().push(value.clone()))
    };

    let mutate = async {
        published.get().label.set("porch".to_owned());
        while context.pending() > 0 {
            tokio::task::yield_now().await;
        }
        handle.shutdown().unwrap();
    };
    let (ran, ()) = tokio::join!(main_loop.run(), mutate);

    ran.unwrap();
    assert_eq!(*seen.borrow(), vec!["porch".to_owned()]);
}
