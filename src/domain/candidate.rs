//! Resolved candidate populations

use super::ids::ClientId;
use std::collections::BTreeSet;

/// The population a filtered export applies to
///
/// `Universal` means "no restriction": generators query brand-wide.
/// `Explicit` holds a deduplicated set of client ids, possibly empty; an empty
/// explicit set restricts every population-scoped dataset to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    Universal,
    Explicit(BTreeSet<ClientId>),
}

impl CandidateSet {
    /// Build an explicit set; duplicates collapse
    pub fn explicit(ids: impl IntoIterator<Item = ClientId>) -> Self {
        CandidateSet::Explicit(ids.into_iter().collect())
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, CandidateSet::Universal)
    }

    /// True for an explicit set with no members
    pub fn is_empty(&self) -> bool {
        matches!(self, CandidateSet::Explicit(ids) if ids.is_empty())
    }

    /// Whether a client belongs to the population
    pub fn contains(&self, id: &ClientId) -> bool {
        match self {
            CandidateSet::Universal => true,
            CandidateSet::Explicit(ids) => ids.contains(id),
        }
    }

    /// Number of members, `None` for `Universal`
    pub fn len(&self) -> Option<usize> {
        match self {
            CandidateSet::Universal => None,
            CandidateSet::Explicit(ids) => Some(ids.len()),
        }
    }

    /// The explicit ids, `None` for `Universal`
    pub fn ids(&self) -> Option<&BTreeSet<ClientId>> {
        match self {
            CandidateSet::Universal => None,
            CandidateSet::Explicit(ids) => Some(ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ClientId {
        ClientId::new(s).unwrap()
    }

    #[test]
    fn test_explicit_deduplicates() {
        let set = CandidateSet::explicit(vec![id("a"), id("b"), id("a")]);
        assert_eq!(set.len(), Some(2));
        assert!(set.contains(&id("a")));
        assert!(!set.contains(&id("c")));
    }

    #[test]
    fn test_universal_contains_everything() {
        let set = CandidateSet::Universal;
        assert!(set.is_universal());
        assert!(set.contains(&id("anything")));
        assert_eq!(set.len(), None);
        assert!(set.ids().is_none());
        assert!(!set.is_empty());
    }

    #[test]
    fn test_empty_explicit_is_not_universal() {
        let set = CandidateSet::explicit(Vec::new());
        assert!(set.is_empty());
        assert!(!set.is_universal());
        assert!(!set.contains(&id("a")));
    }
}
