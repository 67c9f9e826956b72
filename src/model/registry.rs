use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::constants::ROOT_NAME;

use super::config::RegistryOptions;
use super::entity::{Entity, EntityId, EntityKind, next_stamp};
use super::error::Result;
use super::path::NamespaceRef;

/// Intern table of every declared entity, keyed by qualified path.
///
/// All entities live in a single arena (`arena`) and are referenced by
/// [`EntityId`]. The root namespace is always present at index 0 and is
/// not part of the intern table.
#[derive(Debug)]
pub struct Registry {
    /// Generation stamp shared by every handle this registry hands out.
    stamp: u32,
    /// Arena storage for all entities, registered or not.
    arena: Vec<Entity>,
    /// Qualified path -> entity (IndexMap preserves registration order).
    table: IndexMap<Arc<str>, EntityId, FxBuildHasher>,
    options: RegistryOptions,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        let mut registry = Self {
            stamp: 0,
            arena: Vec::new(),
            table: IndexMap::default(),
            options,
        };
        registry.install_root();
        registry
    }

    fn install_root(&mut self) {
        self.stamp = next_stamp();
        let root = EntityId::root(self.stamp);
        self.arena.push(Entity::new(
            root,
            EntityKind::Namespace,
            SmolStr::new_static(ROOT_NAME),
            Some(Arc::from("")),
            None,
            self.options.canonical,
        ));
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Drop every entity and reinstate an empty root.
    ///
    /// Handles issued before the reset no longer resolve.
    pub fn reset(&mut self) {
        tracing::info!(
            "[REGISTRY] reset: dropping {} registered entities ({} total)",
            self.table.len(),
            self.arena.len()
        );
        self.arena.clear();
        self.table.clear();
        self.install_root();
    }

    /// The root namespace.
    pub fn root(&self) -> EntityId {
        EntityId::root(self.stamp)
    }

    /// Returns true if `id` was issued by this registry since its last reset.
    pub fn contains(&self, id: EntityId) -> bool {
        id.stamp() == self.stamp && id.index() < self.arena.len()
    }

    /// Get an entity by handle (O(1) arena lookup).
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if id.stamp() != self.stamp {
            return None;
        }
        self.arena.get(id.index())
    }

    /// Get a mutable entity by handle (O(1) arena lookup).
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.stamp() != self.stamp {
            return None;
        }
        self.arena.get_mut(id.index())
    }

    /// Find a registered entity by its exact qualified path.
    pub fn at(&self, path: &str) -> Option<EntityId> {
        let found = self.table.get(path).copied();
        tracing::trace!("[REGISTRY] at '{}' -> {:?}", path, found);
        found
    }

    /// Find a registered entity by path and borrow it.
    pub fn lookup(&self, path: &str) -> Option<&Entity> {
        self.at(path).and_then(|id| self.get(id))
    }

    /// Intern an entity without an initialization step.
    pub fn intern(
        &mut self,
        namespace: impl Into<NamespaceRef>,
        name: &str,
        kind: EntityKind,
    ) -> Result<EntityId> {
        self.intern_with(namespace, name, kind, |_| {})
    }

    /// Look up the entity for `namespace` + `name`, creating it if needed,
    /// then run `init` on it.
    ///
    /// For a fixed path every call returns the same handle and `init` always
    /// mutates that one entity, so the latest call's writes win. The kind of
    /// an existing entity is kept.
    pub fn intern_with<F>(
        &mut self,
        namespace: impl Into<NamespaceRef>,
        name: &str,
        kind: EntityKind,
        init: F,
    ) -> Result<EntityId>
    where
        F: FnOnce(&mut Entity),
    {
        let resolved = self.resolve_name(namespace.into(), name)?;

        let path = match (resolved.register, resolved.namespace) {
            (true, Some(ns)) => Some(self.compose_path(ns, kind, &resolved.name)),
            _ => None,
        };

        let existing = path.as_deref().and_then(|p| self.at(p));
        let id = match existing {
            Some(id) => {
                tracing::debug!("[REGISTRY] merging into existing '{}'", resolved.name);
                id
            }
            None => self.allocate(kind, resolved.name, path, resolved.namespace)?,
        };

        if let Some(entity) = self.get_mut(id) {
            if entity.kind() != kind {
                tracing::debug!(
                    "[REGISTRY] '{}' redeclared as {:?}, keeping {:?}",
                    entity.title(),
                    kind,
                    entity.kind()
                );
            }
            init(entity);
        }
        Ok(id)
    }

    /// Push a new entity into the arena, register it and link it to its namespace.
    pub(super) fn allocate(
        &mut self,
        kind: EntityKind,
        name: SmolStr,
        path: Option<Arc<str>>,
        namespace: Option<EntityId>,
    ) -> Result<EntityId> {
        let id = EntityId::try_new(self.stamp, self.arena.len())?;
        let entity = Entity::new(id, kind, name, path, namespace, self.options.canonical);

        if let Some(path) = entity.path_arc() {
            self.table.insert(path.clone(), id);
        }
        tracing::debug!(
            "[REGISTRY] created {:?} '{}' ({})",
            kind,
            entity.title(),
            if entity.is_registered() {
                "registered"
            } else {
                "unregistered"
            }
        );
        self.arena.push(entity);

        if let Some(parent) = namespace.and_then(|ns| self.get_mut(ns)) {
            parent.add_child(id);
        }
        Ok(id)
    }

    // ============================================================
    // Traversal
    // ============================================================

    /// Direct children of an entity, in insertion order.
    pub fn children(&self, id: EntityId) -> impl Iterator<Item = &Entity> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|entity| entity.children())
            .filter_map(|child| self.get(child))
    }

    /// The containing entity.
    pub fn namespace_of(&self, id: EntityId) -> Option<&Entity> {
        self.get(id)?.namespace().and_then(|ns| self.get(ns))
    }

    /// Depth-first, pre-order walk over every descendant of `id`.
    pub fn walk(&self, id: EntityId) -> Walk<'_> {
        let mut stack: Vec<EntityId> = self
            .get(id)
            .map(|e| e.children().collect())
            .unwrap_or_default();
        stack.reverse();
        Walk {
            registry: self,
            stack,
        }
    }

    /// Registered entities in registration order (root excluded).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.table.values().filter_map(|id| self.get(*id))
    }

    /// Qualified paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(|path| &**path)
    }

    /// Number of registered entities (root excluded).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of entities in the arena, including the root and unregistered ones.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`Registry::walk`].
pub struct Walk<'a> {
    registry: &'a Registry,
    stack: Vec<EntityId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Entity;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(entity) = self.registry.get(id) else {
                continue;
            };
            let start = self.stack.len();
            self.stack.extend(entity.children());
            self.stack[start..].reverse();
            return Some(entity);
        }
        None
    }
}
