//! PostgreSQL lock manager
//!
//! Orchestrates the snapshot path (fetch raw rows, map, resolve, build the
//! graph), the role-validated drill-down lookup, and the single-shot
//! terminate action.

use crate::item::PgLockItem;
use crate::key::ResourceKey;
use crate::lock::PgLock;
use crate::matrix::conflict_matrix;
use crate::mode::PgLockMode;
use crate::queries::{ACTIVITY_QUERY, LOCK_ITEM_QUERY, LOCK_ROWS_QUERY, TERMINATE_QUERY};
use lockview_core::{
    resolve, BlockingGraph, DatabaseSession, ItemRequest, LockRecord, LockSnapshot, Result, Row,
    ServerLockManager, SessionActivity,
};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

/// Pid of one server backend.
pub type Pid = i32;

/// Lock diagnostics against one PostgreSQL server.
///
/// Stateless between calls; every snapshot is fetched and resolved from
/// scratch, so a terminate action never has to patch an in-memory graph.
#[derive(Debug, Default)]
pub struct PgLockManager;

impl PgLockManager {
    pub fn new() -> Self {
        Self
    }

    fn lock_records(rows: &[Row]) -> Result<Vec<LockRecord<Pid, PgLockMode, ResourceKey>>> {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let mode_text = row.try_string("mode")?;
            let mode = match mode_text.parse::<PgLockMode>() {
                Ok(mode) => mode,
                Err(_) => {
                    // Modes outside the table taxonomy (SIRead predicate
                    // locks) have no conflict entry either way; skip the row.
                    tracing::debug!("skipping lock row with unhandled mode: {}", mode_text);
                    continue;
                }
            };
            records.push(LockRecord {
                pid: row.try_i32("pid")?,
                key: ResourceKey {
                    transaction: row.opt_string("tid")?,
                    relation: row.opt_i64("relation")?,
                    page: row.opt_i64("page")?,
                    tuple: row.opt_i64("tuple")?,
                },
                mode,
                granted: row.try_bool("granted")?,
            });
        }
        Ok(records)
    }

    fn activity_map(rows: &[Row]) -> Result<HashMap<Pid, SessionActivity>> {
        let mut activity = HashMap::with_capacity(rows.len());
        for row in rows {
            activity.insert(
                row.try_i32("pid")?,
                SessionActivity {
                    user: row.try_string("usename")?,
                    query: row.try_string("query")?,
                },
            );
        }
        Ok(activity)
    }
}

impl ServerLockManager for PgLockManager {
    type Id = Pid;
    type Lock = PgLock;
    type Item = PgLockItem;

    fn snapshot(&self, session: &mut dyn DatabaseSession) -> Result<LockSnapshot<Pid, PgLock>> {
        let lock_rows = session.query(LOCK_ROWS_QUERY, &[])?;
        let activity_rows = session.query(ACTIVITY_QUERY, &[])?;

        let records = Self::lock_records(&lock_rows)?;
        let activity = Self::activity_map(&activity_rows)?;

        let resolved = resolve(conflict_matrix(), &records, &activity);
        let graph = BlockingGraph::build(
            resolved
                .iter()
                .map(|(&pid, block)| (pid, block.blocking_pid)),
        );
        let locks: BTreeMap<Pid, PgLock> = resolved
            .iter()
            .map(|(&pid, block)| (pid, PgLock::from_resolved(pid, block)))
            .collect();

        tracing::debug!(
            "resolved {} blocked sessions from {} lock rows",
            locks.len(),
            lock_rows.len()
        );

        Ok(LockSnapshot { locks, graph })
    }

    fn lock_items(
        &self,
        session: &mut dyn DatabaseSession,
        request: &ItemRequest<Pid>,
    ) -> Result<Vec<PgLockItem>> {
        let Some(pid) = request.selected_pid() else {
            return Ok(Vec::new());
        };

        let rows = session.query(LOCK_ITEM_QUERY, &[json!(pid)])?;
        rows.iter().map(PgLockItem::from_row).collect()
    }

    fn terminate(&self, session: &mut dyn DatabaseSession, pid: Pid) -> Result<()> {
        tracing::debug!("requesting termination of backend {}", pid);
        session.execute(TERMINATE_QUERY, &[json!(pid)])
    }
}
