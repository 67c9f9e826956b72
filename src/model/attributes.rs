//! Attribute table: typed fields with generic key access.
//!
//! A handful of well-known attributes (`source`, `signature`, `docstring`,
//! `dynamic`) are stored in typed fields with dedicated accessors. Generic
//! [`AttributeTable::get`]/[`AttributeTable::set`] dispatch to those fields
//! first, so writing through either path is visible through the other.
//! Any other key lands in an insertion-ordered map of dynamic slots.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::{Location, normalize_source};
use crate::docstring::Docstring;

pub const SOURCE: &str = "source";
pub const SIGNATURE: &str = "signature";
pub const DOCSTRING: &str = "docstring";
pub const DYNAMIC: &str = "dynamic";

/// A value stored in an entity's attribute table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<AttrValue>),
    Docstring(Docstring),
    Locations(Vec<Location>),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_docstring(&self) -> Option<&Docstring> {
        match self {
            AttrValue::Docstring(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_locations(&self) -> Option<&[Location]> {
        match self {
            AttrValue::Locations(locations) => Some(locations),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Text(_) => "text",
            AttrValue::List(_) => "list",
            AttrValue::Docstring(_) => "docstring",
            AttrValue::Locations(_) => "locations",
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<Docstring> for AttrValue {
    fn from(value: Docstring) -> Self {
        AttrValue::Docstring(value)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(value: Vec<AttrValue>) -> Self {
        AttrValue::List(value)
    }
}

impl From<Vec<Location>> for AttrValue {
    fn from(value: Vec<Location>) -> Self {
        AttrValue::Locations(value)
    }
}

/// Attributes with a dedicated accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KnownField {
    Source,
    Signature,
    Docstring,
    Dynamic,
}

impl KnownField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            SOURCE => Some(KnownField::Source),
            SIGNATURE => Some(KnownField::Signature),
            DOCSTRING => Some(KnownField::Docstring),
            DYNAMIC => Some(KnownField::Dynamic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    source: Option<String>,
    signature: Option<String>,
    docstring: Docstring,
    dynamic: bool,
    extra: IndexMap<SmolStr, AttrValue, FxBuildHasher>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Typed accessors
    // ============================================================

    /// Normalized source text of the declaration.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Store source text, re-indented with [`normalize_source`].
    pub fn set_source(&mut self, raw: &str) {
        self.source = Some(normalize_source(raw));
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.signature = Some(signature.into());
    }

    pub fn docstring(&self) -> &Docstring {
        &self.docstring
    }

    /// Assign documentation. Raw text is parsed; a [`Docstring`] is stored as is.
    pub fn set_docstring(&mut self, docstring: impl Into<Docstring>) {
        self.docstring = docstring.into();
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
    }

    // ============================================================
    // Generic access
    // ============================================================

    /// Read an attribute by key. Unset keys yield `None`.
    pub fn get(&self, key: &str) -> Option<AttrValue> {
        match KnownField::from_key(key) {
            Some(KnownField::Source) => self.source.clone().map(AttrValue::Text),
            Some(KnownField::Signature) => self.signature.clone().map(AttrValue::Text),
            Some(KnownField::Docstring) => Some(AttrValue::Docstring(self.docstring.clone())),
            Some(KnownField::Dynamic) => Some(AttrValue::Bool(self.dynamic)),
            None => self.extra.get(key).cloned(),
        }
    }

    /// Write an attribute by key.
    ///
    /// Keys with a dedicated accessor are routed through it; a value of the
    /// wrong shape for such a key is ignored and `false` is returned.
    /// Any other key creates or replaces a dynamic slot.
    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) -> bool {
        let value = value.into();
        let Some(field) = KnownField::from_key(key) else {
            self.extra.insert(SmolStr::new(key), value);
            return true;
        };

        match (field, value) {
            (KnownField::Source, AttrValue::Text(text)) => self.set_source(&text),
            (KnownField::Signature, AttrValue::Text(text)) => self.set_signature(text),
            (KnownField::Docstring, AttrValue::Text(text)) => self.set_docstring(text),
            (KnownField::Docstring, AttrValue::Docstring(doc)) => self.set_docstring(doc),
            (KnownField::Dynamic, AttrValue::Bool(flag)) => self.set_dynamic(flag),
            (field, value) => {
                tracing::warn!(
                    "[ATTR] ignoring {} value for '{}' ({:?})",
                    value.kind(),
                    key,
                    field
                );
                return false;
            }
        }
        true
    }

    /// Remove a dynamic slot. Accessor-backed attributes cannot be removed.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.extra.shift_remove(key)
    }

    /// Returns true if the key is accessor-backed or has a dynamic slot.
    pub fn contains_key(&self, key: &str) -> bool {
        KnownField::from_key(key).is_some() || self.extra.contains_key(key)
    }

    /// Dynamic slots in insertion order.
    pub fn dynamic_slots(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_is_absent() {
        let table = AttributeTable::new();
        assert_eq!(table.get("nothing"), None);
        assert!(!table.contains_key("nothing"));
    }

    #[test]
    fn test_dynamic_slot_roundtrip() {
        let mut table = AttributeTable::new();
        assert!(table.set("some_attr", "hello"));
        assert_eq!(table.get("some_attr"), Some(AttrValue::from("hello")));
        table.set("some_attr", 2);
        assert_eq!(table.get("some_attr").and_then(|v| v.as_int()), Some(2));
        assert_eq!(table.remove("some_attr"), Some(AttrValue::Int(2)));
        assert_eq!(table.get("some_attr"), None);
    }

    #[test]
    fn test_source_routes_through_accessor() {
        let mut table = AttributeTable::new();
        table.set(SOURCE, "hello");
        assert_eq!(table.source(), Some("hello"));
        table.set_source("unhello");
        assert_eq!(table.get(SOURCE), Some(AttrValue::from("unhello")));
        assert_eq!(table.dynamic_slots().count(), 0);
    }

    #[test]
    fn test_source_is_normalized_on_write() {
        let mut table = AttributeTable::new();
        table.set(SOURCE, "    def x\n      1\n    end\n");
        assert_eq!(table.source(), Some("def x\n  1\nend"));
    }

    #[test]
    fn test_docstring_text_is_coerced() {
        let mut table = AttributeTable::new();
        table.set(DOCSTRING, "DOCSTRING");
        let value = table.get(DOCSTRING).unwrap();
        let doc = value.as_docstring().unwrap();
        assert_eq!(doc, "DOCSTRING");

        let again = doc.clone();
        table.set(DOCSTRING, again.clone());
        assert_eq!(table.docstring(), &again);
    }

    #[test]
    fn test_wrong_shape_for_known_field_is_ignored() {
        let mut table = AttributeTable::new();
        table.set_source("kept");
        assert!(!table.set(SOURCE, 5));
        assert_eq!(table.source(), Some("kept"));
        assert!(!table.set(DYNAMIC, "yes"));
        assert!(!table.is_dynamic());
    }

    #[test]
    fn test_dynamic_flag() {
        let mut table = AttributeTable::new();
        assert_eq!(table.get(DYNAMIC), Some(AttrValue::Bool(false)));
        table.set(DYNAMIC, true);
        assert!(table.is_dynamic());
    }

    #[test]
    fn test_dynamic_slots_keep_insertion_order() {
        let mut table = AttributeTable::new();
        table.set("b", 1);
        table.set("a", 2);
        table.set("c", 3);
        let keys: Vec<_> = table.dynamic_slots().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
