//! Error types for the editor

use thiserror::Error;

/// Failure of the key/value store behind a [`crate::LayoutRepository`]
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value under key '{0}' is not valid UTF-8")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] pagebuilder_model::ModelError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Nothing stored under key '{0}'")]
    NothingStored(String),

    #[error("Stored layout under key '{0}' is malformed")]
    Malformed(String),

    #[error("Layout failed validation: {0}")]
    Invalid(#[from] pagebuilder_model::ValidationFailure),
}
