//! Thread-safe registry handle.
//!
//! Scans of independent files may run on different threads. Every mutating
//! call takes the write lock for its whole duration, which also covers the
//! insertion into shared ancestor namespaces' children.

use std::sync::Arc;

use parking_lot::RwLock;

use super::declare::Declaration;
use super::entity::{Entity, EntityId, EntityKind};
use super::error::Result;
use super::path::NamespaceRef;
use super::registry::Registry;

/// Cloneable handle to a registry behind a read/write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn intern_with<F>(
        &self,
        namespace: impl Into<NamespaceRef>,
        name: &str,
        kind: EntityKind,
        init: F,
    ) -> Result<EntityId>
    where
        F: FnOnce(&mut Entity),
    {
        self.inner.write().intern_with(namespace, name, kind, init)
    }

    pub fn declare(&self, declaration: Declaration) -> Result<EntityId> {
        self.inner.write().declare(declaration)
    }

    pub fn at(&self, path: &str) -> Option<EntityId> {
        self.inner.read().at(path)
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// Run `f` with shared read access.
    pub fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive write access.
    pub fn write<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_parallel_declarations_share_identity() {
        let shared = SharedRegistry::default();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .declare(Declaration::new(
                            NamespaceRef::Root,
                            "Shared::Thing",
                            EntityKind::Type,
                            (format!("file{i}.rb"), 1),
                        ))
                        .unwrap()
                })
            })
            .collect();
        let ids: Vec<EntityId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(ids.iter().all(|id| *id == ids[0]));

        shared.read(|registry| {
            let thing = registry.get(ids[0]).unwrap();
            assert_eq!(thing.files().len(), 4);
            let ns = registry.lookup("Shared").unwrap();
            assert_eq!(ns.children().count(), 1);
        });
    }

    #[test]
    fn test_reset_through_handle() {
        let shared = SharedRegistry::default();
        shared
            .intern_with(NamespaceRef::Root, "Gone", EntityKind::Namespace, |_| {})
            .unwrap();
        assert!(shared.at("Gone").is_some());
        shared.reset();
        assert!(shared.at("Gone").is_none());
        assert!(shared.read(|r| r.is_empty()));
    }
}
