//! Registry options

/// Which recorded declaration becomes an entity's canonical location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanonicalPolicy {
    /// The most recently recorded documented declaration moves to the front.
    #[default]
    LatestDocumented,
    /// Only the first documented declaration moves to the front; later
    /// documented ones keep their discovery position.
    FirstDocumented,
    /// Documentation never reorders; the first discovered declaration is canonical.
    FirstDiscovered,
}

/// Options for a [`Registry`](super::Registry).
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Canonical location selection for entities declared more than once
    pub canonical: CanonicalPolicy,
}

impl RegistryOptions {
    pub fn with_canonical(mut self, canonical: CanonicalPolicy) -> Self {
        self.canonical = canonical;
        self
    }
}
