//! Demo client
//!
//! Declares a store behind a capability trait, resolves it through plain and
//! observable bindings, and prints per-field changes while mutating it.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use stitch_application::{
    AsObservable, ObjectWillChangePublisher, ObservableObject, Published, Stitch,
    StitchObservable, StitchPublished, Stitchable, stitchify,
};
use stitch_infrastructure::StitchContext;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Capability the store is resolved as
pub trait SomeProtocol: AsObservable {
    /// Construction number of this instance
    fn instance(&self) -> u64;
    /// Visible property
    fn property(&self) -> String;
    /// Replace the visible property
    fn set_property(&self, value: String);
}

/// Observable store with one property behind the capability and one outside it
pub struct SomeStore {
    will_change: ObjectWillChangePublisher,
    instance: u64,
    property: Published<String>,
    other_property: Published<String>,
}

impl Default for SomeStore {
    fn default() -> Self {
        let will_change = ObjectWillChangePublisher::new();
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            property: Published::new("hello".to_owned(), &will_change),
            other_property: Published::new("not visible by protocol".to_owned(), &will_change),
            will_change,
        }
    }
}

impl SomeStore {
    /// Property not exposed through [`SomeProtocol`]
    pub fn other_property(&self) -> String {
        self.other_property.get()
    }
}

impl ObservableObject for SomeStore {
    fn object_will_change(&self) -> &ObjectWillChangePublisher {
        &self.will_change
    }
}

impl AsObservable for SomeStore {
    fn as_observable(&self) -> Option<&dyn ObservableObject> {
        Some(self)
    }
}

impl SomeProtocol for SomeStore {
    fn instance(&self) -> u64 {
        self.instance
    }

    fn property(&self) -> String {
        self.property.get()
    }

    fn set_property(&self, value: String) {
        self.property.set(value);
    }
}

stitchify!(SomeStore, by: dyn SomeProtocol);

/// Show that unique scope constructs while application scope memoises
fn scope_demo() {
    stitch_application::dependency_key! {
        static FRESH_STORE: Rc<SomeStore> = Rc::new(SomeStore::default()), scope: Unique;
    }

    let shared = Stitch::<Rc<dyn SomeProtocol>>::of::<SomeStore>();
    let fresh = Stitch::new(&FRESH_STORE);
    println!(
        "application scope: instance {} then {}",
        shared.get().instance(),
        shared.get().instance()
    );
    println!(
        "unique scope: instance {} then {}",
        fresh.get().instance(),
        fresh.get().instance()
    );
    println!("unique store extra: {}", fresh.get().other_property());
}

/// Reads the store through a plain and an observable binding
struct SomeStruct {
    new: Stitch<Rc<dyn SomeProtocol>>,
    new_observable: StitchObservable<Rc<dyn SomeProtocol>>,
}

impl SomeStruct {
    fn new() -> Self {
        Self {
            new: Stitch::of::<SomeStore>(),
            new_observable: StitchObservable::of::<SomeStore>(),
        }
    }

    fn do_something(&self) {
        println!("{}", self.new.get().property());
        println!("instance {}", self.new_observable.get().instance());
    }
}

/// Mutates the store and prints each distinct property value
async fn another_class(context: &StitchContext) {
    let new_published = StitchPublished::<Rc<dyn SomeProtocol>>::of::<SomeStore>();
    let property = new_published.field("property", |store| store.property());
    let _printer = property.subscribe(|value| println!("property is changing to: {value}"));

    println!("making changes: world");
    new_published.get().set_property("world".to_owned());
    settle(context).await;

    println!("changing again: new");
    new_published.get().set_property("new".to_owned());
    settle(context).await;

    println!("writing the same value: new");
    new_published.get().set_property("new".to_owned());
    settle(context).await;

    println!("closing");
}

/// Let posted deliveries run, whichever executor is installed
///
/// The queue is drained in place; the main loop is given turns until it has
/// caught up.
async fn settle(context: &StitchContext) {
    loop {
        context.drain();
        if context.pending() == 0 {
            break;
        }
        tokio::task::yield_now().await;
    }
}

/// Run the demo
pub async fn run(context: &StitchContext, with_scope_demo: bool) {
    SomeStruct::new().do_something();
    another_class(context).await;

    if with_scope_demo {
        scope_demo();
    }

    let store = <SomeStore as Stitchable>::resolve();
    tracing::debug!(instance = store.instance(), "demo finished");
}
