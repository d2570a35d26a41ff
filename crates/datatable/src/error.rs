use model::core::dialect::DialectError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a table definition. Sorting a request never
/// fails; invalid request input is dropped instead.
#[derive(Debug, Error)]
pub enum DatatableError {
    #[error("failed to read table config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid identifier `{0}` in column source")]
    InvalidIdentifier(String),

    #[error("invalid column {index}: {reason}")]
    InvalidColumn { index: usize, reason: String },

    #[error("column index {0} is defined more than once")]
    DuplicateColumn(usize),

    #[error(transparent)]
    Dialect(#[from] DialectError),
}
