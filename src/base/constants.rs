//! Separators and reserved names used when building qualified paths.

/// Separator between a namespace and a nested namespace or type (`A::B`).
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Separator between a namespace and an instance routine (`A#run`).
pub const INSTANCE_ROUTINE_SEPARATOR: &str = "#";

/// Separator between a namespace and a class-level routine (`A.build`).
pub const CLASS_ROUTINE_SEPARATOR: &str = ".";

/// Name given to the root namespace. Its path is the empty string.
pub const ROOT_NAME: &str = "root";
