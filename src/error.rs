//! Error types for css-relay operations.
//!
//! This module provides the error hierarchy using `thiserror` for
//! all relay operations including the transform pipeline, I/O, and
//! CLI commands.

use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for relay operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transform pipeline errors (parsing, prefixing, printing).
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O errors (stream and file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors produced by the CSS transform pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The pipeline could not parse the input as CSS.
    #[error("failed to parse CSS: {message}")]
    Parse {
        /// Parser diagnostic, including the error location.
        message: String,
    },

    /// The pipeline could not apply transforms to the stylesheet.
    #[error("failed to transform CSS: {message}")]
    Transform {
        /// Transform diagnostic.
        message: String,
    },

    /// The pipeline could not re-serialize the stylesheet.
    #[error("failed to print CSS: {message}")]
    Print {
        /// Printer diagnostic.
        message: String,
    },

    /// A browserslist query could not be resolved to browser targets.
    #[error("invalid browser query: {message}")]
    BrowserQuery {
        /// Browserslist resolution diagnostic.
        message: String,
    },

    /// A worker task running the pipeline failed to complete.
    #[error("pipeline worker failed: {0}")]
    Worker(String),
}

/// I/O-specific errors for stream and file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid UTF-8 encountered at a specific byte offset.
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where invalid UTF-8 was found.
        offset: usize,
    },

    /// Input ended in the middle of a multi-byte UTF-8 sequence.
    #[error("input ended mid UTF-8 sequence")]
    TruncatedUtf8,

    /// The output stream was closed by the reader (e.g., piped to `head`).
    #[error("output pipe closed")]
    BrokenPipe,

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more chunks were rejected by the transform pipeline.
    #[error("transform pipeline rejected {failures} chunk(s): {first}")]
    TransformFailed {
        /// Number of rejected chunks.
        failures: usize,
        /// Diagnostic for the first rejection.
        first: String,
    },
}

// Implement From traits for standard library errors

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::BrokenPipe {
            Self::BrokenPipe
        } else {
            Self::Generic(err.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::from(err))
    }
}
