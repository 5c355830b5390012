//! Lock-mode conflict matrix
//!
//! A fixed table answering: does requesting one mode conflict with another
//! mode already being held, and if so at what tie-break priority. Entries
//! are directional: (A conflicts with held B) does not imply the reverse,
//! and a mode may or may not conflict with itself. Absence of an entry
//! means the pair is compatible, not unknown.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// One conflict entry: a session requesting `requested` is blocked by a
/// session holding `held`. `priority` orders simultaneous blockers for the
/// same waiter; lower value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRule<M> {
    pub requested: M,
    pub held: M,
    pub priority: u32,
}

/// Conflict lookup table over a mode taxonomy `M`.
///
/// Populated once at startup, never mutated afterwards; safe for concurrent
/// reads.
#[derive(Debug, Clone)]
pub struct ConflictMatrix<M> {
    entries: HashMap<(M, M), u32>,
}

impl<M: Copy + Eq + Hash> ConflictMatrix<M> {
    pub fn from_rules(rules: impl IntoIterator<Item = ConflictRule<M>>) -> Self {
        Self {
            entries: rules
                .into_iter()
                .map(|rule| ((rule.requested, rule.held), rule.priority))
                .collect(),
        }
    }

    /// The tie-break priority if requesting `requested` conflicts with a
    /// held `held`, `None` when the pair may be granted concurrently.
    pub fn conflicts(&self, requested: M, held: M) -> Option<u32> {
        self.entries.get(&(requested, held)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
