//! Blocking-edge entity handed to the viewer

use crate::manager::Pid;
use lockview_core::ResolvedBlock;
use serde::{Deserialize, Serialize};

/// One waiting session and the session elected as blocking it, with the
/// display metadata the viewer shows alongside the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgLock {
    pub wait_pid: Pid,
    pub wait_user: String,
    pub wait_query: String,
    pub hold_pid: Pid,
    pub hold_user: String,
    pub hold_query: String,
}

impl PgLock {
    pub fn from_resolved(wait_pid: Pid, block: &ResolvedBlock<Pid>) -> Self {
        Self {
            wait_pid,
            wait_user: block.blocked_user.clone(),
            wait_query: block.blocked_query.clone(),
            hold_pid: block.blocking_pid,
            hold_user: block.blocking_user.clone(),
            hold_query: block.blocking_query.clone(),
        }
    }
}
