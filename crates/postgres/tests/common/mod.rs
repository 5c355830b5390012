//! Common test utilities for integration tests

use lockview_core::{DatabaseSession, Error, Result, Row};
use lockview_postgres::{ACTIVITY_QUERY, LOCK_ITEM_QUERY, LOCK_ROWS_QUERY};
use serde_json::{json, Value};

/// Scripted in-memory session: canned rows per statement, full call
/// recording, optional injected failures.
#[derive(Default)]
pub struct MockSession {
    pub lock_rows: Vec<Row>,
    pub activity_rows: Vec<Row>,
    pub item_rows: Vec<Row>,
    pub queries: Vec<(String, Vec<Value>)>,
    pub executions: Vec<(String, Vec<Value>)>,
    pub fail_next_query: bool,
    pub fail_next_execute: bool,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatabaseSession for MockSession {
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.queries.push((sql.to_string(), params.to_vec()));

        if self.fail_next_query {
            self.fail_next_query = false;
            return Err(Error::data_source(
                "lock query",
                std::io::Error::other("connection reset"),
            ));
        }

        match sql {
            LOCK_ROWS_QUERY => Ok(self.lock_rows.clone()),
            ACTIVITY_QUERY => Ok(self.activity_rows.clone()),
            LOCK_ITEM_QUERY => Ok(self.item_rows.clone()),
            other => panic!("unexpected query: {other}"),
        }
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        self.executions.push((sql.to_string(), params.to_vec()));

        if self.fail_next_execute {
            self.fail_next_execute = false;
            return Err(Error::data_source(
                "terminate backend",
                std::io::Error::other("permission denied"),
            ));
        }

        Ok(())
    }
}

/// A `pg_locks` row targeting a relation.
#[allow(dead_code)]
pub fn relation_lock_row(pid: i32, mode: &str, granted: bool, relation: i64) -> Row {
    Row::from_pairs([
        ("pid", json!(pid)),
        ("mode", json!(mode)),
        ("granted", json!(granted)),
        ("tid", json!(null)),
        ("relation", json!(relation)),
        ("page", json!(null)),
        ("tuple", json!(null)),
    ])
}

/// A `pg_locks` row targeting a whole transaction.
#[allow(dead_code)]
pub fn transaction_lock_row(pid: i32, mode: &str, granted: bool, xid: &str) -> Row {
    Row::from_pairs([
        ("pid", json!(pid)),
        ("mode", json!(mode)),
        ("granted", json!(granted)),
        ("tid", json!(xid)),
        ("relation", json!(null)),
        ("page", json!(null)),
        ("tuple", json!(null)),
    ])
}

#[allow(dead_code)]
pub fn activity_row(pid: i32, user: &str, query: &str) -> Row {
    Row::from_pairs([
        ("pid", json!(pid)),
        ("usename", json!(user)),
        ("query", json!(query)),
    ])
}

/// A detail-query row as the item statement returns it.
#[allow(dead_code)]
pub fn item_row(pid: i32, lock_type: &str, relation: &str, mode: &str, granted: bool) -> Row {
    Row::from_pairs([
        ("datname", json!("app")),
        ("locktype", json!(lock_type)),
        ("relation", json!(relation)),
        ("mode", json!(mode)),
        ("tid", json!("")),
        ("page", json!(null)),
        ("tuple", json!(null)),
        ("pid", json!(pid)),
        ("granted", json!(granted)),
    ])
}
