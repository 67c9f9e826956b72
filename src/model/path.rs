//! Path resolution: namespace argument + declared name → namespace entity + leaf.
//!
//! A compound name such as `A::B::C` overrides the namespace argument: the
//! prefix `A::B` is resolved from the root, creating any missing namespaces
//! along the way, and `C` becomes the leaf. A leading `::` anchors a plain
//! name at the root.
//!
//! Only members of registered namespaces are registered. An entity declared
//! inside an unregistered one has no qualified path of its own.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::constants::NAMESPACE_SEPARATOR;

use super::entity::{EntityId, EntityKind};
use super::error::{RegistryError, Result};
use super::registry::Registry;

/// The namespace an entity is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespaceRef {
    /// No namespace: the entity is built but never registered.
    #[default]
    None,
    /// Shorthand for the registry's root namespace.
    Root,
    /// An existing entity of the same registry.
    Entity(EntityId),
}

impl From<EntityId> for NamespaceRef {
    fn from(id: EntityId) -> Self {
        NamespaceRef::Entity(id)
    }
}

impl From<Option<EntityId>> for NamespaceRef {
    fn from(id: Option<EntityId>) -> Self {
        id.map_or(NamespaceRef::None, NamespaceRef::Entity)
    }
}

/// Outcome of resolving a declaration's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Effective namespace entity, if any.
    pub namespace: Option<EntityId>,
    /// Leaf name of the entity.
    pub name: SmolStr,
    /// Whether the entity goes into the intern table.
    pub register: bool,
}

/// A declared name split into its parts, before any registry access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SplitName<'a> {
    /// `true` when the name started with `::`.
    pub anchored: bool,
    /// Namespace segments preceding the leaf.
    pub prefix: Vec<&'a str>,
    pub leaf: &'a str,
}

/// Split `A::B::C` into prefix `[A, B]` and leaf `C`.
pub(super) fn split_name(name: &str) -> Result<SplitName<'_>> {
    let (anchored, rest) = match name.strip_prefix(NAMESPACE_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    let mut segments: Vec<&str> = rest.split(NAMESPACE_SEPARATOR).collect();
    let leaf = segments.pop().unwrap_or("");
    if leaf.is_empty() || segments.iter().any(|s| s.is_empty()) {
        return Err(RegistryError::empty_name(name));
    }

    Ok(SplitName {
        anchored,
        prefix: segments,
        leaf,
    })
}

/// Join a namespace path, separator and leaf into a qualified path.
///
/// Members of the root namespace drop the `::` separator but keep routine
/// separators (`#key?`, `.build`).
pub(super) fn join_path(namespace_path: &str, kind: EntityKind, leaf: &str) -> Arc<str> {
    let separator = kind.separator();
    if namespace_path.is_empty() && separator == NAMESPACE_SEPARATOR {
        Arc::from(leaf)
    } else {
        Arc::from(format!("{namespace_path}{separator}{leaf}"))
    }
}

impl Registry {
    /// Check that a namespace argument is usable, without touching the registry.
    pub(super) fn validate_namespace(&self, namespace: NamespaceRef) -> Result<()> {
        match namespace {
            NamespaceRef::None | NamespaceRef::Root => Ok(()),
            NamespaceRef::Entity(id) if self.contains(id) => Ok(()),
            NamespaceRef::Entity(id) => Err(RegistryError::invalid_namespace(format!(
                "stale or foreign entity handle {id}"
            ))),
        }
    }

    /// Resolve a namespace argument and declared name.
    ///
    /// Validation happens before anything is created, so a failed resolution
    /// leaves the registry untouched. Intermediate namespaces of a compound
    /// name are created (and registered) on success.
    pub fn resolve_name(&mut self, namespace: NamespaceRef, name: &str) -> Result<ResolvedName> {
        self.validate_namespace(namespace)?;
        let split = split_name(name)?;

        let effective = if !split.prefix.is_empty() {
            Some(self.vivify_namespaces(&split.prefix)?)
        } else if split.anchored {
            Some(self.root())
        } else {
            match namespace {
                NamespaceRef::None => None,
                NamespaceRef::Root => Some(self.root()),
                NamespaceRef::Entity(id) => Some(id),
            }
        };

        let register = !matches!(namespace, NamespaceRef::None)
            && effective
                .and_then(|ns| self.get(ns))
                .is_some_and(|ns| ns.is_registered());

        tracing::trace!(
            "[RESOLVE] '{}' -> namespace={:?} leaf='{}' register={}",
            name,
            effective.and_then(|id| self.get(id)).map(|e| e.title()),
            split.leaf,
            register
        );

        Ok(ResolvedName {
            namespace: effective,
            name: SmolStr::new(split.leaf),
            register,
        })
    }

    /// Qualified path for `leaf` declared as `kind` inside the registered `namespace`.
    pub(super) fn compose_path(
        &self,
        namespace: EntityId,
        kind: EntityKind,
        leaf: &str,
    ) -> Arc<str> {
        let namespace_path = self.get(namespace).and_then(|e| e.path()).unwrap_or("");
        join_path(namespace_path, kind, leaf)
    }

    /// Walk `segments` from the root, creating missing namespaces.
    fn vivify_namespaces(&mut self, segments: &[&str]) -> Result<EntityId> {
        let mut current = self.root();
        for segment in segments {
            let path = self.compose_path(current, EntityKind::Namespace, segment);
            current = match self.at(&path) {
                Some(existing) => existing,
                None => {
                    tracing::debug!("[RESOLVE] creating intermediate namespace '{}'", path);
                    self.allocate(
                        EntityKind::Namespace,
                        SmolStr::new(segment),
                        Some(path),
                        Some(current),
                    )?
                }
            };
        }
        Ok(current)
    }
}
