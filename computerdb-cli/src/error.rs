//! CLI error type

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] computerdb_lib::error::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),

    #[error("computer {0} not found")]
    NotFound(i64),

    #[error("company {0} not found")]
    UnknownCompany(i64),
}
