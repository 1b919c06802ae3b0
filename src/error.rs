use std::path::PathBuf;
use thiserror::Error;

use crate::types::RecordId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Query for collection \"{name}\" returned errors: {message}")]
    Query { name: String, message: String },

    #[error("Normalizer for collection \"{name}\" did not return usable items: {reason}")]
    Normalization { name: String, reason: String },

    #[error("Record not found in host graph: {0}")]
    MissingRecord(RecordId),

    #[error("Host graph rejected record: {0}")]
    Host(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Filesystem operation failed at {}: {}", path.display(), source)]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
