// ============================================================
// Layer 3 — Extraction Errors
// ============================================================
// Only whole-document failures are errors. A single malformed
// question block is not: it becomes a SkippedBlock instead.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use thiserror::Error;

/// The class of an extraction failure, for callers that only need
/// to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DocumentRead,
    UnsupportedFormat,
    InvalidHeuristics,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document could not be opened, read, or decoded
    #[error("cannot read document '{path}': {message}")]
    DocumentRead { path: String, message: String },

    /// The file extension is not one the loaders understand
    #[error("unsupported document type '{path}' (expected .pdf or .txt)")]
    UnsupportedFormat { path: String },

    /// A configured heuristic pattern is unusable
    #[error("invalid heuristics: {0}")]
    InvalidHeuristics(String),
}

impl ExtractError {
    pub fn document_read(path: impl Into<String>, message: impl ToString) -> Self {
        ExtractError::DocumentRead {
            path:    path.into(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::DocumentRead { .. }      => ErrorKind::DocumentRead,
            ExtractError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ExtractError::InvalidHeuristics(_)     => ErrorKind::InvalidHeuristics,
        }
    }
}
