//! # Object Model
//!
//! The registry interns every declared entity by qualified path and merges
//! repeated declarations of the same path into one [`Entity`].
//!
//! ## Key Data Structures
//!
//! - [`Registry`] - Arena of entities plus the path → entity intern table
//! - [`Entity`] - Identity, containment, attributes and declaration sites
//! - [`AttributeTable`] - Accessor-backed fields plus dynamic slots
//! - [`LocationLedger`] - Declaration sites with canonical selection
//! - [`SharedRegistry`] - Lock-protected handle for multi-threaded scans

mod attributes;
mod config;
mod declare;
mod entity;
mod error;
mod ledger;
mod path;
mod registry;
mod shared;

pub use attributes::{AttrValue, AttributeTable, DOCSTRING, DYNAMIC, SIGNATURE, SOURCE};
pub use config::{CanonicalPolicy, RegistryOptions};
pub use declare::Declaration;
pub use entity::{Entity, EntityId, EntityKind, FILE, FILES, LINE, NAME, PATH, RoutineScope};
pub use error::{RegistryError, Result};
pub use ledger::LocationLedger;
pub use path::{NamespaceRef, ResolvedName};
pub use registry::{Registry, Walk};
pub use shared::SharedRegistry;
