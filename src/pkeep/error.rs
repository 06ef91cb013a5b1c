use crate::model::RecordKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkeepError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: u64 },

    #[error("File not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// The backing file exists but does not hold a valid collection.
    /// The store cannot be opened in this state.
    #[error("Cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl PkeepError {
    pub fn validation(message: impl Into<String>) -> Self {
        PkeepError::Validation(message.into())
    }

    /// Errors the session can report and move past. Everything else means
    /// the store (or the file system under it) is in a state we can't use.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PkeepError::Validation(_)
                | PkeepError::NotFound { .. }
                | PkeepError::FileMissing(_)
                | PkeepError::InvalidId(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PkeepError>;
