//! Error types for the codec.

use gabbygrove_refs::RefError;
use thiserror::Error;

/// Errors that abort an encode or decode.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The reference itself could not be encoded or decoded.
    #[error("reference error: {0}")]
    Ref(#[from] RefError),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("unexpected CBOR tag: expected {expected}, got {got}")]
    UnexpectedTag { expected: u64, got: u64 },

    #[error("unexpected wire shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("{0} trailing bytes after CBOR item")]
    TrailingBytes(usize),

    #[error("malformed event: {0}")]
    MalformedEvent(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
