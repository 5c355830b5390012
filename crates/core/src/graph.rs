//! Blocking graph
//!
//! Directed blocker → blocked adjacency built fresh from each snapshot's
//! resolution. The server may report a genuine deadlock cycle; that is a
//! valid terminal state to display, so every traversal carries a visited
//! set and terminates.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Who blocks whom, directly and transitively.
///
/// Sessions with no edge in either direction never appear. Ordered maps
/// keep iteration deterministic for a given snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingGraph<P> {
    /// blocker → pids it directly blocks, ascending
    children: BTreeMap<P, Vec<P>>,
    /// blocked → its single elected blocker
    parent: BTreeMap<P, P>,
}

impl<P: Copy + Ord> BlockingGraph<P> {
    /// Build from (blocked, blocker) pairs. Self-edges are dropped.
    pub fn build(edges: impl IntoIterator<Item = (P, P)>) -> Self {
        let mut parent = BTreeMap::new();
        for (blocked, blocker) in edges {
            if blocked == blocker {
                continue;
            }
            parent.insert(blocked, blocker);
        }

        let mut children: BTreeMap<P, Vec<P>> = BTreeMap::new();
        for (&blocked, &blocker) in &parent {
            // parent iterates in blocked order, so each child list stays sorted
            children.entry(blocker).or_default().push(blocked);
        }

        Self { children, parent }
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Every session involved in at least one edge, ascending.
    pub fn pids(&self) -> Vec<P> {
        let mut pids = BTreeSet::new();
        for (&blocked, &blocker) in &self.parent {
            pids.insert(blocked);
            pids.insert(blocker);
        }
        pids.into_iter().collect()
    }

    /// All (blocker, blocked) edges, ordered by blocked pid.
    pub fn edges(&self) -> impl Iterator<Item = (P, P)> + '_ {
        self.parent.iter().map(|(&blocked, &blocker)| (blocker, blocked))
    }

    /// The session directly blocking `pid`, if any.
    pub fn blocked_by(&self, pid: P) -> Option<P> {
        self.parent.get(&pid).copied()
    }

    /// Sessions `pid` directly blocks.
    pub fn blocks(&self, pid: P) -> &[P] {
        match self.children.get(&pid) {
            Some(blocked) => blocked,
            None => &[],
        }
    }

    /// Root blockers: sessions blocking others while not blocked
    /// themselves. A pure cycle has no root; its edges are still reported
    /// through `edges`.
    pub fn roots(&self) -> Vec<P> {
        self.children
            .keys()
            .copied()
            .filter(|pid| !self.parent.contains_key(pid))
            .collect()
    }

    /// Everything `pid` blocks, directly or through intermediate waiters,
    /// in breadth-first order. Each session is visited once, so a deadlock
    /// cycle terminates; when `pid` sits on a cycle the result includes
    /// `pid` itself.
    pub fn blocks_transitively(&self, pid: P) -> Vec<P> {
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<P> = self.blocks(pid).iter().copied().collect();
        let mut reached = Vec::new();

        while let Some(next) = queue.pop_front() {
            if !visited.insert(next) {
                continue;
            }
            reached.push(next);
            queue.extend(self.blocks(next).iter().copied());
        }

        reached
    }

    /// The chain of blockers above `pid`, direct blocker first. Each
    /// session appears once; a cycle ends the walk instead of looping.
    pub fn blocking_chain(&self, pid: P) -> Vec<P> {
        let mut visited = BTreeSet::new();
        let mut chain = Vec::new();
        let mut current = pid;

        while let Some(blocker) = self.blocked_by(current) {
            if !visited.insert(blocker) {
                break;
            }
            chain.push(blocker);
            current = blocker;
        }

        chain
    }
}
