//! Server lock-manager contract
//!
//! The diagnostics operations behind one interface so alternate
//! mode-taxonomy backends plug in without touching resolution or graph
//! code.

use crate::error::Result;
use crate::graph::BlockingGraph;
use crate::session::DatabaseSession;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Role discriminator: the waiting side of a selected edge.
pub const ROLE_WAIT: &str = "wait";
/// Role discriminator: the holding side of a selected edge.
pub const ROLE_HOLD: &str = "hold";

/// One consistent snapshot: per-waiter lock entities plus the blocking
/// graph, rebuilt from scratch on every fetch.
#[derive(Debug, Clone)]
pub struct LockSnapshot<P, L> {
    pub locks: BTreeMap<P, L>,
    pub graph: BlockingGraph<P>,
}

/// Drill-down selection context from the viewer: which side of the chosen
/// edge to inspect, plus both side pids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest<P> {
    pub role: String,
    pub wait_pid: P,
    pub hold_pid: P,
}

impl<P: Copy> ItemRequest<P> {
    pub fn new(role: impl Into<String>, wait_pid: P, hold_pid: P) -> Self {
        Self {
            role: role.into(),
            wait_pid,
            hold_pid,
        }
    }

    /// The pid selected by the role. An unrecognized role selects nothing;
    /// the lookup then yields an empty result, not an error.
    pub fn selected_pid(&self) -> Option<P> {
        match self.role.as_str() {
            ROLE_WAIT => Some(self.wait_pid),
            ROLE_HOLD => Some(self.hold_pid),
            _ => None,
        }
    }
}

/// Lock diagnostics over one server session.
///
/// All operations are synchronous request/response; callers serialize
/// access to the session.
pub trait ServerLockManager {
    /// Session identifier (pid).
    type Id: Copy + Ord + Hash;
    /// Per-waiter lock entity handed to the viewer.
    type Lock;
    /// Detail row for the drill-down view.
    type Item;

    /// Fetch one snapshot and resolve it into lock entities and a graph.
    fn snapshot(
        &self,
        session: &mut dyn DatabaseSession,
    ) -> Result<LockSnapshot<Self::Id, Self::Lock>>;

    /// Detailed lock rows for the pid selected by `request`.
    fn lock_items(
        &self,
        session: &mut dyn DatabaseSession,
        request: &ItemRequest<Self::Id>,
    ) -> Result<Vec<Self::Item>>;

    /// Ask the server to terminate backend `pid`. One attempt, no retry,
    /// no confirmation wait; the next snapshot reflects the outcome.
    fn terminate(&self, session: &mut dyn DatabaseSession, pid: Self::Id) -> Result<()>;
}
