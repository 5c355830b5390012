//! Error types for lock diagnostics

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The underlying query or command failed. Carries the originating
    /// driver error; never swallowed, never retried here.
    #[error("data source failure during {context}")]
    DataSource {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("missing column in result row: {0}")]
    MissingColumn(String),

    #[error("unexpected value in column {column}: expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("unrecognized lock mode: {0}")]
    UnknownMode(String),
}

impl Error {
    /// Wrap an underlying driver error, naming the operation that failed.
    pub fn data_source(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DataSource {
            context: context.into(),
            source: source.into(),
        }
    }
}
