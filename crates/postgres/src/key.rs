//! Composite resource key
//!
//! Identifies the thing a lock row targets. Transaction locks carry only
//! the transaction id; relation locks the relation; heap-tuple locks
//! relation/page/tuple. An absent component is a wildcard and a wildcard
//! is equal only to another wildcard, so two rows target the same resource
//! iff every component matches.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub transaction: Option<String>,
    pub relation: Option<i64>,
    pub page: Option<i64>,
    pub tuple: Option<i64>,
}

impl ResourceKey {
    pub fn for_transaction(xid: impl Into<String>) -> Self {
        Self {
            transaction: Some(xid.into()),
            ..Self::default()
        }
    }

    pub fn for_relation(relation: i64) -> Self {
        Self {
            relation: Some(relation),
            ..Self::default()
        }
    }

    pub fn for_page(relation: i64, page: i64) -> Self {
        Self {
            relation: Some(relation),
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn for_tuple(relation: i64, page: i64, tuple: i64) -> Self {
        Self {
            relation: Some(relation),
            page: Some(page),
            tuple: Some(tuple),
            ..Self::default()
        }
    }

    /// All components absent. Such keys are genuinely ambiguous: they equal
    /// each other and may match unrelated resources.
    pub fn is_wildcard(&self) -> bool {
        self.transaction.is_none()
            && self.relation.is_none()
            && self.page.is_none()
            && self.tuple.is_none()
    }
}

/// `tid:relation:page:tuple` with `*` for wildcards, for logs only;
/// matching uses field-wise equality, never this rendering.
impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map_or_else(|| "*".to_string(), T::to_string)
        }

        write!(
            f,
            "{}:{}:{}:{}",
            part(&self.transaction),
            part(&self.relation),
            part(&self.page),
            part(&self.tuple)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_fields_are_equal() {
        assert_eq!(ResourceKey::for_tuple(16384, 3, 7), ResourceKey::for_tuple(16384, 3, 7));
        assert_eq!(ResourceKey::for_transaction("751"), ResourceKey::for_transaction("751"));
    }

    #[test]
    fn test_any_differing_field_is_unequal() {
        let key = ResourceKey::for_tuple(16384, 3, 7);
        assert_ne!(key, ResourceKey::for_tuple(16385, 3, 7));
        assert_ne!(key, ResourceKey::for_tuple(16384, 4, 7));
        assert_ne!(key, ResourceKey::for_tuple(16384, 3, 8));
        assert_ne!(key, ResourceKey::for_page(16384, 3));
    }

    #[test]
    fn test_wildcard_matches_only_wildcard() {
        assert_eq!(ResourceKey::default(), ResourceKey::default());
        assert!(ResourceKey::default().is_wildcard());
        assert_ne!(ResourceKey::default(), ResourceKey::for_relation(16384));
    }

    #[test]
    fn test_transaction_and_relation_keys_differ() {
        // A transaction lock and a relation lock never collide, unlike the
        // concatenated-string form where separator reuse could.
        assert_ne!(
            ResourceKey::for_transaction("16384"),
            ResourceKey::for_relation(16384)
        );
    }

    #[test]
    fn test_display_form() {
        assert_eq!(ResourceKey::for_transaction("751").to_string(), "751:*:*:*");
        assert_eq!(ResourceKey::for_tuple(16384, 3, 7).to_string(), "*:16384:3:7");
        assert_eq!(ResourceKey::default().to_string(), "*:*:*:*");
    }
}
