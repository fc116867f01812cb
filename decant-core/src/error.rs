use std::path::PathBuf;
use thiserror::Error;

/// Error types for decant operations.
///
/// Per-file conversion errors (`Decode`, `Write`, `Transcode`, `Io`) are
/// recorded in that file's [`ConversionResult`](crate::processing::ConversionResult)
/// and do not abort a batch. Setup errors (`DirectoryNotFound`,
/// `NoInputFiles`, `DependencyMissing`, `Config`) abort the run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No convertible input files found")]
    NoInputFiles,

    #[error("Failed to decode '{}': {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcode of '{}' failed: {detail}", .path.display())]
    Transcode { path: PathBuf, detail: String },

    #[error("Required dependency not found: {0}")]
    DependencyMissing(String),

    #[error("Failed to start '{tool}': {source}")]
    CommandStart {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    PathError(String),
}

/// Result type for decant operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
