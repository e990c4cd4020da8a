use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the backing store. None of these are recoverable for the CLI.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access store file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse store file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write store file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid store contents")]
    Json(#[from] serde_json::Error),
    #[error("task stored under key {key} has id {id}")]
    IdMismatch { key: u32, id: u32 },
    #[error("task {0} leaves no id for new tasks")]
    IdsExhausted(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaskError {
    /// Carries the id as given, which may not even be a number.
    #[error("Task {0} does not exist")]
    NotFound(String),
    #[error("no task ids left to assign")]
    IdsExhausted,
}
