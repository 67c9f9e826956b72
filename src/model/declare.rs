//! Declaration merge pipeline.
//!
//! A scanner reports each declaration it finds as a [`Declaration`]. Feeding
//! it to [`Registry::declare`] interns the entity and merges the new site,
//! documentation and source text into it.

use crate::base::Location;

use super::entity::{EntityId, EntityKind};
use super::error::Result;
use super::path::NamespaceRef;
use super::registry::Registry;

/// One declaration discovered by a scan.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub namespace: NamespaceRef,
    /// Declared name, possibly compound (`A::B`).
    pub name: String,
    pub kind: EntityKind,
    pub location: Location,
    /// Raw comment text preceding the declaration.
    pub docstring: Option<String>,
    /// Raw source span of the declaration.
    pub source: Option<String>,
    pub signature: Option<String>,
}

impl Declaration {
    pub fn new(
        namespace: impl Into<NamespaceRef>,
        name: impl Into<String>,
        kind: EntityKind,
        location: impl Into<Location>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            location: location.into(),
            docstring: None,
            source: None,
            signature: None,
        }
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Returns true if the declaration carries non-blank documentation.
    pub fn is_documented(&self) -> bool {
        self.docstring
            .as_deref()
            .is_some_and(|doc| !doc.trim().is_empty())
    }
}

impl Registry {
    /// Intern a declaration and merge it into its entity.
    ///
    /// - The site is recorded in the location ledger, flagged as documented
    ///   when the docstring is non-blank.
    /// - The docstring replaces the current one when the site became
    ///   canonical, or when the entity has no documentation yet.
    /// - Source and signature are last-write-wins.
    pub fn declare(&mut self, declaration: Declaration) -> Result<EntityId> {
        let documented = declaration.is_documented();
        let Declaration {
            namespace,
            name,
            kind,
            location,
            docstring,
            source,
            signature,
        } = declaration;

        self.intern_with(namespace, &name, kind, |entity| {
            let canonical = entity.add_location(location, documented);
            if let Some(raw) = docstring.filter(|_| documented) {
                if canonical || entity.docstring().is_blank() {
                    entity.set_docstring(raw);
                }
            }
            if let Some(raw) = source {
                entity.set_source(&raw);
            }
            if let Some(signature) = signature {
                entity.set_signature(signature);
            }
        })
    }

    /// Declare a sequence in discovery order, stopping at the first error.
    pub fn declare_all<I>(&mut self, declarations: I) -> Result<Vec<EntityId>>
    where
        I: IntoIterator<Item = Declaration>,
    {
        declarations
            .into_iter()
            .map(|declaration| self.declare(declaration))
            .collect()
    }
}
