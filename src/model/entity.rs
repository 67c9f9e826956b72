//! Entities: one interned declaration (namespace, type or routine).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::Location;
use crate::base::constants::{
    CLASS_ROUTINE_SEPARATOR, INSTANCE_ROUTINE_SEPARATOR, NAMESPACE_SEPARATOR,
};
use crate::docstring::Docstring;

use super::attributes::{AttrValue, AttributeTable};
use super::config::CanonicalPolicy;
use super::error::{RegistryError, Result};
use super::ledger::LocationLedger;

/// Derived, read-only keys served by [`Entity::get`].
pub const NAME: &str = "name";
pub const PATH: &str = "path";
pub const FILE: &str = "file";
pub const LINE: &str = "line";
pub const FILES: &str = "files";

static NEXT_STAMP: AtomicU32 = AtomicU32::new(1);

/// Draw a stamp that no other registry generation shares.
pub(super) fn next_stamp() -> u32 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Handle to an entity in a registry arena.
///
/// The stamp identifies the registry generation that allocated the entity,
/// so handles from another registry or from before a reset are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    stamp: u32,
    index: u32,
}

impl EntityId {
    /// Handle of the root namespace, always at arena index 0.
    pub(super) fn root(stamp: u32) -> Self {
        Self { stamp, index: 0 }
    }

    /// Handle for arena slot `index`.
    ///
    /// Fails with [`RegistryError::CapacityExceeded`] once the arena grows past
    /// `u32::MAX` entries.
    pub(super) fn try_new(stamp: u32, index: usize) -> Result<Self> {
        let index = u32::try_from(index).map_err(|_| RegistryError::capacity_exceeded(index))?;
        Ok(Self { stamp, index })
    }

    pub(super) fn stamp(self) -> u32 {
        self.stamp
    }

    /// Index into the registry arena.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity_{}@{}", self.index, self.stamp)
    }
}

/// Whether a routine is called on instances or on the namespace itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoutineScope {
    #[default]
    Instance,
    Class,
}

/// What kind of program construct an entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Namespace,
    Type,
    Routine(RoutineScope),
}

impl EntityKind {
    /// Separator placed between the namespace path and this entity's name.
    pub fn separator(self) -> &'static str {
        match self {
            EntityKind::Namespace | EntityKind::Type => NAMESPACE_SEPARATOR,
            EntityKind::Routine(RoutineScope::Instance) => INSTANCE_ROUTINE_SEPARATOR,
            EntityKind::Routine(RoutineScope::Class) => CLASS_ROUTINE_SEPARATOR,
        }
    }

    /// Returns true if this kind can contain other entities by name.
    pub fn is_namespace_like(self) -> bool {
        matches!(self, EntityKind::Namespace | EntityKind::Type)
    }
}

/// An interned program entity.
///
/// Entities are owned by the registry arena. Relations to other entities are
/// stored as [`EntityId`] handles, so the parent/children graph holds no
/// owning cycles.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    name: SmolStr,
    path: Option<Arc<str>>,
    namespace: Option<EntityId>,
    children: IndexSet<EntityId, FxBuildHasher>,
    attributes: AttributeTable,
    locations: LocationLedger,
}

impl Entity {
    pub(super) fn new(
        id: EntityId,
        kind: EntityKind,
        name: SmolStr,
        path: Option<Arc<str>>,
        namespace: Option<EntityId>,
        policy: CanonicalPolicy,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            path,
            namespace,
            children: IndexSet::default(),
            attributes: AttributeTable::new(),
            locations: LocationLedger::new(policy),
        }
    }

    pub(super) fn add_child(&mut self, child: EntityId) -> bool {
        self.children.insert(child)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified path; `None` for entities that were not registered.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(super) fn path_arc(&self) -> Option<&Arc<str>> {
        self.path.as_ref()
    }

    /// Path if registered, otherwise the bare name.
    pub fn title(&self) -> &str {
        self.path().unwrap_or(&self.name)
    }

    pub fn is_registered(&self) -> bool {
        self.path.is_some()
    }

    /// The containing entity, if any.
    pub fn namespace(&self) -> Option<EntityId> {
        self.namespace
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.children.iter().copied()
    }

    pub fn has_child(&self, child: EntityId) -> bool {
        self.children.contains(&child)
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }

    // ============================================================
    // Locations
    // ============================================================

    pub fn locations(&self) -> &LocationLedger {
        &self.locations
    }

    /// Record a declaration site. Returns `true` if it is now canonical.
    pub fn add_location(&mut self, location: impl Into<Location>, has_docstring: bool) -> bool {
        self.locations.record(location.into(), has_docstring)
    }

    /// File of the canonical declaration.
    pub fn file(&self) -> Option<&str> {
        self.locations.canonical_file()
    }

    /// Line of the canonical declaration.
    pub fn line(&self) -> Option<usize> {
        self.locations.canonical_line()
    }

    /// Every declaration site, canonical first.
    pub fn files(&self) -> Vec<Location> {
        self.locations.all_locations().cloned().collect()
    }

    // ============================================================
    // Accessor shortcuts
    // ============================================================

    pub fn source(&self) -> Option<&str> {
        self.attributes.source()
    }

    pub fn set_source(&mut self, raw: &str) {
        self.attributes.set_source(raw);
    }

    pub fn signature(&self) -> Option<&str> {
        self.attributes.signature()
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.attributes.set_signature(signature);
    }

    pub fn docstring(&self) -> &Docstring {
        self.attributes.docstring()
    }

    pub fn set_docstring(&mut self, docstring: impl Into<Docstring>) {
        self.attributes.set_docstring(docstring);
    }

    // ============================================================
    // Generic access
    // ============================================================

    /// Read an attribute by key, including the derived identity and
    /// location keys (`name`, `path`, `file`, `line`, `files`).
    pub fn get(&self, key: &str) -> Option<AttrValue> {
        match key {
            NAME => Some(AttrValue::from(self.name.to_string())),
            PATH => self.path().map(AttrValue::from),
            FILE => self.file().map(AttrValue::from),
            LINE => self.line().map(|line| AttrValue::Int(line as i64)),
            FILES => Some(AttrValue::Locations(self.files())),
            _ => self.attributes.get(key),
        }
    }

    /// Write an attribute by key. Derived keys are read-only and ignored.
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) -> bool {
        if matches!(key, NAME | PATH | FILE | LINE | FILES) {
            tracing::warn!(
                "[ENTITY] '{}' is derived and cannot be set on {}",
                key,
                self.title()
            );
            return false;
        }
        self.attributes.set(key, value)
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, path: Option<&str>) -> Entity {
        Entity::new(
            EntityId::root(next_stamp()),
            EntityKind::Type,
            SmolStr::new(name),
            path.map(Arc::from),
            None,
            CanonicalPolicy::default(),
        )
    }

    #[test]
    fn test_separators() {
        assert_eq!(EntityKind::Namespace.separator(), "::");
        assert_eq!(EntityKind::Type.separator(), "::");
        assert_eq!(EntityKind::Routine(RoutineScope::Instance).separator(), "#");
        assert_eq!(EntityKind::Routine(RoutineScope::Class).separator(), ".");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_handle_index_beyond_u32_is_rejected() {
        let stamp = next_stamp();
        assert_eq!(EntityId::try_new(stamp, 7).unwrap().index(), 7);
        let max = u32::MAX as usize;
        assert_eq!(EntityId::try_new(stamp, max).unwrap().index(), max);
        assert!(matches!(
            EntityId::try_new(stamp, max + 1),
            Err(RegistryError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_stamps_are_unique() {
        assert_ne!(next_stamp(), next_stamp());
    }

    #[test]
    fn test_derived_keys() {
        let mut e = entity("X", Some("A::X"));
        e.add_location(("a.rb", 3), false);
        assert_eq!(e.get(NAME), Some(AttrValue::from("X")));
        assert_eq!(e.get(PATH), Some(AttrValue::from("A::X")));
        assert_eq!(e.get(FILE), Some(AttrValue::from("a.rb")));
        assert_eq!(e.get(LINE), Some(AttrValue::Int(3)));
        assert_eq!(
            e.get(FILES),
            Some(AttrValue::Locations(vec![Location::new("a.rb", 3)]))
        );
    }

    #[test]
    fn test_derived_keys_are_read_only() {
        let mut e = entity("X", None);
        assert!(!e.set(FILE, "elsewhere.rb"));
        assert_eq!(e.get(FILE), None);
        assert_eq!(e.get(PATH), None);
        assert_eq!(e.title(), "X");
    }

    #[test]
    fn test_accessor_and_generic_access_agree() {
        let mut e = entity("YARD", Some("YARD"));
        e.set("source", "hello");
        assert_eq!(e.source(), Some("hello"));
        e.set_source("unhello");
        assert_eq!(e.get("source"), Some(AttrValue::from("unhello")));

        e.set("something", 2);
        assert_eq!(e.get("something"), Some(AttrValue::Int(2)));
    }
}
