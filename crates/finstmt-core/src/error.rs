//! Error types for the finstmt-core library.

use thiserror::Error;

/// Main error type for the finstmt library.
#[derive(Error, Debug)]
pub enum FinstmtError {
    /// Source document error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the source document.
///
/// Heuristic extraction misses are never errors; only total inability to
/// read the source document is fatal.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source document could not be decoded.
    #[error("failed to decode source document: {0}")]
    Decode(String),

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,
}

/// Result type for the finstmt library.
pub type Result<T> = std::result::Result<T, FinstmtError>;
