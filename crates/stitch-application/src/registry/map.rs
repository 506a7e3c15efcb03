//! Thread-local dependency arena
//!
//! Every coordinating thread owns one [`DependencyMap`]. Slots are indexed
//! by [`KeyId`], so lookups never hash and never fail: a key that has not
//! been materialised yet produces its default on first access.
//!
//! ## Re-entrancy
//!
//! Factories may resolve other keys while they run. The arena borrow is
//! released before a factory is called and re-acquired to store its result.
//! If a nested resolution of the same key stored a value in the meantime,
//! the first stored value wins and is returned to both callers.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;

use stitch_domain::KeyId;
use stitch_domain::constants::REGISTRY_INITIAL_CAPACITY;
use tracing::{debug, trace};

use super::key::DependencyKey;

struct StoredDependency {
    value: Box<dyn Any>,
    key_name: &'static str,
}

#[derive(Default)]
struct Slot {
    stored: Option<StoredDependency>,
    resolves: u64,
}

/// Contents of one slot, detached from the arena
///
/// Produced by [`DependencyMap::replace_slot`] and handed back to
/// [`DependencyMap::restore_slot`] to undo an overwrite.
pub struct SavedSlot {
    id: KeyId,
    stored: Option<StoredDependency>,
}

impl SavedSlot {
    /// Key this slot belongs to
    pub fn key_id(&self) -> KeyId {
        self.id
    }

    /// Whether the slot held a value when it was saved
    pub fn was_occupied(&self) -> bool {
        self.stored.is_some()
    }
}

impl fmt::Debug for SavedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedSlot")
            .field("id", &self.id)
            .field("key", &self.stored.as_ref().map(|s| s.key_name))
            .finish()
    }
}

/// Registry of current dependency values for this thread
///
/// All access goes through associated functions; the arena itself is never
/// handed out, which keeps borrows short and local.
pub struct DependencyMap {
    slots: Vec<Slot>,
}

thread_local! {
    static MAP: RefCell<DependencyMap> = RefCell::new(DependencyMap::new());
}

impl DependencyMap {
    fn new() -> Self {
        Self {
            slots: Vec::with_capacity(REGISTRY_INITIAL_CAPACITY),
        }
    }

    fn slot_mut(&mut self, id: KeyId) -> &mut Slot {
        let index = id.index();
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, Slot::default);
        }
        &mut self.slots[index]
    }

    fn slot(&self, id: KeyId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    fn current<T: Clone + 'static>(&self, id: KeyId) -> Option<T> {
        self.slot(id)?
            .stored
            .as_ref()?
            .value
            .downcast_ref::<T>()
            .cloned()
    }

    fn store<T: 'static>(
        &mut self,
        id: KeyId,
        key_name: &'static str,
        value: T,
    ) -> Option<StoredDependency> {
        self.slot_mut(id).stored.replace(StoredDependency {
            value: Box::new(value),
            key_name,
        })
    }

    /// Current value of `key`, materialising the default on first access
    pub fn resolve<T: Clone + 'static>(key: &DependencyKey<T>) -> T {
        let id = key.id();
        let existing = MAP.with(|map| {
            let mut map = map.borrow_mut();
            map.slot_mut(id).resolves += 1;
            map.current::<T>(id)
        });
        if let Some(value) = existing {
            return value;
        }

        debug!(key = key.name(), %id, "materialising default dependency");
        let value = key.make_default();

        let (resolved, displaced) = MAP.with(|map| {
            let mut map = map.borrow_mut();
            if let Some(winner) = map.current::<T>(id) {
                trace!(key = key.name(), "nested resolution stored first; keeping it");
                return (winner, None);
            }
            let displaced = map.store(id, key.name(), value.clone());
            (value, displaced)
        });
        drop(displaced);
        resolved
    }

    /// Replace the current value of `key`
    pub fn register<T: 'static>(key: &DependencyKey<T>, value: T) {
        let id = key.id();
        debug!(key = key.name(), %id, "registering dependency");
        // Old values are dropped unborrowed; their destructors may touch the map.
        let previous = MAP.with(|map| map.borrow_mut().store(id, key.name(), value));
        drop(previous);
    }

    /// Drop the stored value so the next resolution builds the default again
    ///
    /// Returns `true` when a value was stored.
    pub fn remove<T: 'static>(key: &DependencyKey<T>) -> bool {
        let id = key.id();
        let removed = MAP.with(|map| {
            map.borrow_mut()
                .slots
                .get_mut(id.index())
                .and_then(|slot| slot.stored.take())
        });
        removed.is_some()
    }

    /// Whether `key` currently has a stored value
    pub fn contains<T: 'static>(key: &DependencyKey<T>) -> bool {
        let id = key.id();
        MAP.with(|map| {
            map.borrow()
                .slot(id)
                .is_some_and(|slot| slot.stored.is_some())
        })
    }

    /// Number of keys with a stored value
    pub fn len() -> usize {
        MAP.with(|map| {
            map.borrow()
                .slots
                .iter()
                .filter(|slot| slot.stored.is_some())
                .count()
        })
    }

    /// Whether no key has a stored value
    pub fn is_empty() -> bool {
        Self::len() == 0
    }

    /// Names of the keys with a stored value, in arena order
    pub fn registered_names() -> Vec<&'static str> {
        MAP.with(|map| {
            map.borrow()
                .slots
                .iter()
                .filter_map(|slot| slot.stored.as_ref().map(|s| s.key_name))
                .collect()
        })
    }

    /// How many times `key` was resolved through the map on this thread
    pub fn resolve_count<T: 'static>(key: &DependencyKey<T>) -> u64 {
        let id = key.id();
        MAP.with(|map| map.borrow().slot(id).map_or(0, |slot| slot.resolves))
    }

    /// Count a resolution that was served without the stored value
    ///
    /// Unique keys build a fresh instance on every call but still take part
    /// in the late-mock check.
    pub fn record_resolution<T: 'static>(key: &DependencyKey<T>) {
        let id = key.id();
        MAP.with(|map| map.borrow_mut().slot_mut(id).resolves += 1);
    }

    /// Store `value` for `key`, returning the slot's previous contents
    pub fn replace_slot<T: 'static>(key: &DependencyKey<T>, value: T) -> SavedSlot {
        let id = key.id();
        let stored = Some(StoredDependency {
            value: Box::new(value),
            key_name: key.name(),
        });
        let previous = MAP.with(|map| {
            std::mem::replace(&mut map.borrow_mut().slot_mut(id).stored, stored)
        });
        SavedSlot {
            id,
            stored: previous,
        }
    }

    /// Put saved contents back into their slot
    pub fn restore_slot(saved: SavedSlot) {
        let SavedSlot { id, stored } = saved;
        let overwritten = MAP.with(|map| {
            std::mem::replace(&mut map.borrow_mut().slot_mut(id).stored, stored)
        });
        drop(overwritten);
    }

    /// Drop every stored value and reset resolution statistics
    ///
    /// Keys keep their ids; the next resolution materialises defaults again.
    pub fn clear() {
        let slots = MAP.with(|map| std::mem::take(&mut map.borrow_mut().slots));
        debug!(slots = slots.len(), "cleared dependency map");
        drop(slots);
    }
}

impl fmt::Debug for DependencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyMap")
            .field("slots", &self.slots.len())
            .finish()
    }
}
