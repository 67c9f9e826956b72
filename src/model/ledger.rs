//! Location ledger: every declaration site of one entity.
//!
//! Sites are kept in discovery order. The canonical site (reported as the
//! entity's `file`/`line`) is the first discovered one unless a documented
//! declaration is promoted in front of it according to the [`CanonicalPolicy`].

use crate::base::Location;

use super::config::CanonicalPolicy;

#[derive(Debug, Clone, Default)]
pub struct LocationLedger {
    /// Declaration sites in discovery order.
    discovered: Vec<Location>,
    /// Index into `discovered` of the promoted documented site, if any.
    promoted: Option<usize>,
    policy: CanonicalPolicy,
}

impl LocationLedger {
    pub fn new(policy: CanonicalPolicy) -> Self {
        Self {
            discovered: Vec::new(),
            promoted: None,
            policy,
        }
    }

    pub fn policy(&self) -> CanonicalPolicy {
        self.policy
    }

    /// Append a declaration site.
    ///
    /// Every call adds an entry, so a site declared twice is listed twice.
    /// Returns `true` if the new entry is canonical afterwards.
    pub fn record(&mut self, location: Location, has_docstring: bool) -> bool {
        self.discovered.push(location);
        let idx = self.discovered.len() - 1;

        if has_docstring {
            let promote = match self.policy {
                CanonicalPolicy::LatestDocumented => true,
                CanonicalPolicy::FirstDocumented => self.promoted.is_none(),
                CanonicalPolicy::FirstDiscovered => false,
            };
            if promote {
                tracing::debug!(
                    "[LEDGER] promoting {} to canonical (was {:?})",
                    self.discovered[idx],
                    self.canonical()
                );
                self.promoted = Some(idx);
            }
        }

        self.canonical_index() == Some(idx)
    }

    fn canonical_index(&self) -> Option<usize> {
        if self.discovered.is_empty() {
            None
        } else {
            Some(self.promoted.unwrap_or(0))
        }
    }

    /// The canonical declaration site.
    pub fn canonical(&self) -> Option<&Location> {
        self.canonical_index().map(|idx| &self.discovered[idx])
    }

    pub fn canonical_file(&self) -> Option<&str> {
        self.canonical().map(Location::file)
    }

    pub fn canonical_line(&self) -> Option<usize> {
        self.canonical().map(|l| l.line)
    }

    /// All sites: the canonical one first, the rest in discovery order.
    pub fn all_locations(&self) -> impl Iterator<Item = &Location> {
        let canonical = self.canonical_index();
        canonical
            .map(|idx| &self.discovered[idx])
            .into_iter()
            .chain(
                self.discovered
                    .iter()
                    .enumerate()
                    .filter(move |(idx, _)| Some(*idx) != canonical)
                    .map(|(_, location)| location),
            )
    }

    /// Sites in the order they were recorded, ignoring promotion.
    pub fn discovery_order(&self) -> &[Location] {
        &self.discovered
    }

    pub fn len(&self) -> usize {
        self.discovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }
}
