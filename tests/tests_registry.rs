#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Registry Tests - Interning, Merging and Registration
//!
//! Identity and registration behaviour of the intern table as seen by a
//! scanning front end.

use docent::{EntityKind, NamespaceRef, Registry, RegistryError, RoutineScope};
use rstest::rstest;

const INSTANCE: EntityKind = EntityKind::Routine(RoutineScope::Instance);
const CLASS: EntityKind = EntityKind::Routine(RoutineScope::Class);

// ============================================================================
// Identity
// ============================================================================

#[rstest]
#[case(EntityKind::Type, EntityKind::Namespace)]
#[case(EntityKind::Namespace, EntityKind::Type)]
#[case(EntityKind::Type, EntityKind::Type)]
fn test_reinterning_returns_same_handle(#[case] first: EntityKind, #[case] second: EntityKind) {
    let mut registry = Registry::new();
    let a = registry.intern(NamespaceRef::Root, "Me", first).unwrap();
    let b = registry.intern(NamespaceRef::Root, "Me", second).unwrap();
    assert_eq!(a, b);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_last_write_wins() {
    let mut registry = Registry::new();
    let a = registry
        .intern_with(NamespaceRef::Root, "Me", EntityKind::Type, |e| {
            e.set("visibility", "public");
            e.set_signature("class Me");
        })
        .unwrap();
    let b = registry
        .intern_with(NamespaceRef::Root, "Me", EntityKind::Type, |e| {
            e.set("visibility", "private");
        })
        .unwrap();
    assert_eq!(a, b);
    let me = registry.get(a).unwrap();
    assert_eq!(me.get("visibility").unwrap().as_text(), Some("private"));
    assert_eq!(me.signature(), Some("class Me"));
}

// ============================================================================
// Paths
// ============================================================================

#[rstest]
#[case("Me", EntityKind::Type, "Me")]
#[case("A::B", EntityKind::Type, "A::B")]
#[case("A::B::C", EntityKind::Namespace, "A::B::C")]
#[case("::Top", EntityKind::Type, "Top")]
#[case("key?", INSTANCE, "#key?")]
#[case("A::build", CLASS, "A.build")]
#[case("A::run", INSTANCE, "A#run")]
fn test_paths_from_root(#[case] name: &str, #[case] kind: EntityKind, #[case] path: &str) {
    let mut registry = Registry::new();
    let id = registry.intern(NamespaceRef::Root, name, kind).unwrap();
    assert_eq!(registry.get(id).unwrap().path(), Some(path));
    assert_eq!(registry.at(path), Some(id));
}

#[test]
fn test_nested_namespace_paths() {
    let mut registry = Registry::new();
    let xyz = registry
        .intern(NamespaceRef::Root, "XYZ", EntityKind::Namespace)
        .unwrap();
    let zyx = registry.intern(xyz, "ZYX", EntityKind::Namespace).unwrap();
    let abc = registry.intern(zyx, "ABC", EntityKind::Type).unwrap();
    let msg = registry.intern(abc, "msg", INSTANCE).unwrap();
    assert_eq!(registry.at("XYZ::ZYX::ABC#msg"), Some(msg));
    assert_eq!(registry.namespace_of(msg).unwrap().id(), abc);
}

// ============================================================================
// Registration gating
// ============================================================================

#[rstest]
#[case("Me")]
#[case("A::Me")]
#[case("::Me")]
fn test_none_namespace_never_registers(#[case] name: &str) {
    let mut registry = Registry::new();
    let id = registry.intern(NamespaceRef::None, name, EntityKind::Type).unwrap();
    let entity = registry.get(id).unwrap();
    assert!(!entity.is_registered());
    assert_eq!(entity.name(), "Me");
    assert!(registry.iter().all(|e| e.id() != id));
    assert_eq!(registry.at(name.trim_start_matches("::")), None);
}

#[rstest]
#[case("C", EntityKind::Type)]
#[case("D", EntityKind::Namespace)]
#[case("run", INSTANCE)]
#[case("build", CLASS)]
fn test_members_of_unregistered_namespace_are_unregistered(
    #[case] name: &str,
    #[case] kind: EntityKind,
) {
    let mut registry = Registry::new();
    let loose = registry
        .intern(NamespaceRef::None, "A::B", EntityKind::Namespace)
        .unwrap();
    let member = registry.intern(loose, name, kind).unwrap();

    assert!(!registry.get(member).unwrap().is_registered());
    assert_eq!(registry.namespace_of(member).unwrap().id(), loose);
    assert_eq!(registry.paths().collect::<Vec<_>>(), vec!["A"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_foreign_handle_is_invalid_namespace() {
    let mut first = Registry::new();
    let foreign = first
        .intern(NamespaceRef::Root, "Foreign", EntityKind::Namespace)
        .unwrap();

    let mut second = Registry::new();
    let err = second.intern(foreign, "Me", EntityKind::Type).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidNamespaceKind { .. }));
    assert!(err.to_string().starts_with("Invalid namespace kind"));
    assert!(second.is_empty());
    assert_eq!(second.arena_len(), 1);
}

#[rstest]
#[case("")]
#[case("A::")]
#[case("A::::B")]
fn test_empty_names_are_rejected(#[case] name: &str) {
    let mut registry = Registry::new();
    let err = registry
        .intern(NamespaceRef::Root, name, EntityKind::Type)
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyName { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_reset_reinstates_root() {
    let mut registry = Registry::new();
    registry
        .intern(NamespaceRef::Root, "A::B", EntityKind::Type)
        .unwrap();
    assert_eq!(registry.len(), 2);

    registry.reset();
    assert!(registry.is_empty());
    assert_eq!(registry.lookup("A::B"), None);
    assert_eq!(registry.children(registry.root()).count(), 0);
    assert_eq!(registry.get(registry.root()).unwrap().name(), "root");
}
