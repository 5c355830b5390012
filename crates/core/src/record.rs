//! Snapshot and resolution records

use serde::{Deserialize, Serialize};

/// One raw lock-acquisition row from a point-in-time snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord<P, M, K> {
    pub pid: P,
    pub key: K,
    pub mode: M,
    pub granted: bool,
}

/// Per-session display metadata from the activity view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionActivity {
    pub user: String,
    pub query: String,
}

/// The blocker elected for one waiting session, joined with activity
/// metadata for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBlock<P> {
    pub blocking_pid: P,
    pub blocked_user: String,
    pub blocking_user: String,
    pub blocked_query: String,
    pub blocking_query: String,
}
