//! Error types for the file-backed data the game reads and writes.

use thiserror::Error;

/// Errors that can occur when loading config or leaderboard data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// File could not be written.
    #[error("Failed to write file '{path}': {details}")]
    WriteError { path: String, details: String },
}
