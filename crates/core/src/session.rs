//! Statement-execution seam
//!
//! The connection/session layer is an external collaborator; this module
//! defines the contract diagnostics code drives it through and the row
//! shape it hands back. Implementations own statement and result-set
//! lifecycle and must release both on every exit path.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Synchronous statement execution against one server session.
///
/// Callers serialize access to a given session; no internal concurrency is
/// assumed on either side of the seam.
pub trait DatabaseSession {
    /// Run a query and return all result rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Run a statement for its side effect only.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()>;
}

/// One result row, columns addressed by name.
#[derive(Debug, Clone, Default)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    /// Build a row from (column, value) pairs.
    pub fn from_pairs<C, I>(pairs: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = (C, Value)>,
    {
        Self {
            columns: pairs.into_iter().map(|(c, v)| (c.into(), v)).collect(),
        }
    }

    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.columns.insert(column.into(), value);
    }

    fn get(&self, column: &str) -> Result<&Value> {
        self.columns
            .get(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    pub fn try_i64(&self, column: &str) -> Result<i64> {
        self.get(column)?.as_i64().ok_or_else(|| Error::ColumnType {
            column: column.to_string(),
            expected: "integer",
        })
    }

    pub fn try_i32(&self, column: &str) -> Result<i32> {
        i32::try_from(self.try_i64(column)?).map_err(|_| Error::ColumnType {
            column: column.to_string(),
            expected: "32-bit integer",
        })
    }

    /// `None` when the column holds SQL NULL.
    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value.as_i64().map(Some).ok_or_else(|| Error::ColumnType {
                column: column.to_string(),
                expected: "integer",
            }),
        }
    }

    pub fn try_str(&self, column: &str) -> Result<&str> {
        self.get(column)?.as_str().ok_or_else(|| Error::ColumnType {
            column: column.to_string(),
            expected: "text",
        })
    }

    pub fn try_string(&self, column: &str) -> Result<String> {
        self.try_str(column).map(str::to_string)
    }

    /// `None` when the column holds SQL NULL.
    pub fn opt_string(&self, column: &str) -> Result<Option<String>> {
        match self.get(column)? {
            Value::Null => Ok(None),
            value => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| Error::ColumnType {
                    column: column.to_string(),
                    expected: "text",
                }),
        }
    }

    pub fn try_bool(&self, column: &str) -> Result<bool> {
        self.get(column)?.as_bool().ok_or_else(|| Error::ColumnType {
            column: column.to_string(),
            expected: "boolean",
        })
    }
}
