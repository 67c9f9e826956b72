//! # docent-base
//!
//! Object model for source documentation tooling: a registry that interns
//! every declared namespace, type and routine by its qualified path and
//! merges repeated declarations of the same entity across scans.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! model     → Registry, Entity, attributes, location ledger, path resolution
//!   ↓
//! docstring → Structured documentation (summary + tags)
//!   ↓
//! base      → Primitives (Location, separators, source normalization)
//! ```

// ============================================================================
// MODULES (dependency order: base → docstring → model)
// ============================================================================

/// Foundation types: Location, path separators, source text normalization
pub mod base;

/// Docstring: raw comment text turned into summary, body and tags
pub mod docstring;

/// Object model: Registry, Entity, attribute table, location ledger
pub mod model;

// Re-export foundation types
pub use base::{Location, normalize_source};
pub use docstring::{Docstring, Tag};
pub use model::{
    AttrValue, CanonicalPolicy, Declaration, Entity, EntityId, EntityKind, NamespaceRef, Registry,
    RegistryError, RegistryOptions, Result, RoutineScope, SharedRegistry,
};
