// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load document {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Unsupported document type: {0}")]
    Unsupported(PathBuf),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed JSON in {path}: {reason}")]
    MalformedJson { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema must be a JSON object or boolean, got {0}")]
    InvalidRoot(String),

    #[error("Invalid schema: {0}")]
    Invalid(String),

    #[error("Unresolvable schema reference: {0}")]
    UnresolvedRef(String),

    #[error("Schema reference refers back to itself: {0}")]
    CircularRef(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input folder not found: {}", .0.display())]
    InputFolderNotFound(PathBuf),

    #[error("Expected an array of objects in {}, got {found}", .path.display())]
    InvalidBatchShape { path: PathBuf, found: String },

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("{invalid} of {total} records failed validation")]
    InvalidRecords { invalid: usize, total: usize },
}

impl AppError {
    /// Process exit code for this failure: 2 for malformed validation input,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidBatchShape { .. }
            | AppError::Schema(_)
            | AppError::Storage(StorageError::MalformedJson { .. }) => 2,
            _ => 1,
        }
    }
}
