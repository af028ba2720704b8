use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to transfer {from} -> {to}: {error}")]
    Transfer {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: std::io::Error,
    },

    // Filesystem errors
    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    // Metadata errors
    #[error("Failed to read metadata from {path}: {reason}")]
    MetadataUnreadable { path: PathBuf, reason: String },

    #[error("Date parsing error: {0}")]
    InvalidDateFormat(String),

    #[error("No date available for {0}")]
    NoTimestamp(PathBuf),
}

/// Result type for sortphotos operations.
pub type Result<T> = std::result::Result<T, SortError>;
