//! Error types for the gempress library.

use std::io;
use thiserror::Error;

/// Result type alias for gempress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing a polyglot document.
///
/// Malformed gemtext never produces an error: unrecognized constructs
/// degrade to plain text lines during parsing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Retrieving the remote source document failed.
    #[error("Retrieval failed: {0}")]
    Fetch(String),

    /// The remote server replied, but not with a usable document.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The source reference could not be interpreted as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The external layout engine failed to render the page document.
    #[error("Rendering failed: {0}")]
    Render(String),

    /// The source bytes cannot be embedded as a contiguous region.
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// A previously embedded region could not be unambiguously located.
    ///
    /// Stripping must fail closed rather than guess a boundary and risk
    /// losing part of the source document.
    #[error("Ambiguous embedded region: {0}")]
    AmbiguousEmbedding(String),

    /// The input is a PDF but carries no gempress signature, so it has no
    /// recoverable gemtext plane.
    #[error("PDF input is missing the polyglot signature on its second line")]
    MissingSignature,
}
