//! Drill-down detail row

use crate::manager::Pid;
use lockview_core::{Result, Row};
use serde::{Deserialize, Serialize};

/// One `pg_locks` row for a single backend, as shown in the detail view.
///
/// Purely structural: the mode stays a string here so the view shows
/// whatever the server reports, including modes outside the conflict
/// taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgLockItem {
    pub database: String,
    pub lock_type: String,
    pub relation: String,
    pub mode: String,
    pub transaction: String,
    pub page: Option<i64>,
    pub tuple: Option<i64>,
    pub pid: Pid,
    pub granted: bool,
}

impl PgLockItem {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            database: row.try_string("datname")?,
            lock_type: row.try_string("locktype")?,
            relation: row.try_string("relation")?,
            mode: row.try_string("mode")?,
            transaction: row.try_string("tid")?,
            page: row.opt_i64("page")?,
            tuple: row.opt_i64("tuple")?,
            pid: row.try_i32("pid")?,
            granted: row.try_bool("granted")?,
        })
    }
}
