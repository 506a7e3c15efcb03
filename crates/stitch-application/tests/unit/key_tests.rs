//! Tests for declared dependency keys

use stitch_application::DependencyKey;
use stitch_domain::Scope;

static PLAIN: DependencyKey<u32> = DependencyKey::new("plain", || 7);
static FRESH: DependencyKey<u32> = DependencyKey::scoped("fresh", Scope::Unique, || 9);
static OTHER: DependencyKey<u32> = DependencyKey::new("other", || 0);

#[test]
fn test_new_key_is_application_scoped() {
    assert_eq!(PLAIN.name(), "plain");
    assert_eq!(PLAIN.scope(), Scope::Application);
    assert_eq!(FRESH.scope(), Scope::Unique);
}

#[test]
fn test_make_default_calls_the_factory() {
    assert_eq!(PLAIN.make_default(), 7);
    assert_eq!(FRESH.make_default(), 9);
}

#[test]
fn test_id_is_stable_and_distinct_per_key() {
    let first = PLAIN.id();

    assert_eq!(PLAIN.id(), first);
    assert_ne!(OTHER.id(), first);
    assert_eq!(first.index(), first.raw() as usize);
}

#[test]
fn test_debug_names_key_and_type() {
    let rendered = format!("{FRESH:?}");

    assert!(rendered.contains("\"fresh\""));
    assert!(rendered.contains("Unique"));
    assert!(rendered.contains("u32"));
}
