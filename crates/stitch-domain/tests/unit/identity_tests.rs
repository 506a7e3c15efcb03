//! Unit tests for key and object identities

use std::collections::HashSet;
use std::rc::Rc;

use stitch_domain::{KeyId, ObjectId};

#[test]
fn test_key_id_index_and_display() {
    let id = KeyId::new(7);

    assert_eq!(id.raw(), 7);
    assert_eq!(id.index(), 7);
    assert_eq!(id.to_string(), "key#7");
    assert!(KeyId::new(1) < KeyId::new(2));
}

#[test]
fn test_object_id_is_shared_by_handles_to_one_allocation() {
    let first = Rc::new(String::from("store"));
    let second = Rc::clone(&first);

    assert_eq!(ObjectId::of(&*first), ObjectId::of(&*second));
}

#[test]
fn test_object_id_distinguishes_allocations() {
    let first = Rc::new(1_u64);
    let second = Rc::new(1_u64);

    assert_ne!(ObjectId::of(&*first), ObjectId::of(&*second));
}

#[test]
fn test_object_id_ignores_trait_object_metadata() {
    let value = Rc::new(5_u32);
    let as_dyn: &dyn std::fmt::Debug = &*value;

    assert_eq!(ObjectId::of(as_dyn), ObjectId::of(&*value));
}

#[test]
fn test_object_id_display_is_hex() {
    let value = 3_u8;
    let ids: HashSet<ObjectId> = [ObjectId::of(&value), ObjectId::of(&value)].into();

    assert_eq!(ids.len(), 1);
    assert!(ObjectId::of(&value).to_string().starts_with("0x"));
}
