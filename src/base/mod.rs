//! Foundation types for the docent object model.
//!
//! This module provides the primitives the registry is built on:
//! - [`Location`] - A (file, line) declaration site
//! - [`normalize_source`] - Re-indents captured source snippets to column zero
//! - Path separator constants
//!
//! This module has NO dependencies on other docent modules.

pub mod constants;
mod location;
mod text;

pub use location::Location;
pub use text::{indentation_width, normalize_source, strip_line_terminator};
