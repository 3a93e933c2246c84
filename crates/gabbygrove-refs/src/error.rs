//! Error types for Gabby Grove references.

use thiserror::Error;

use crate::binref::RefType;
use crate::refs::RefAlgo;

/// Errors that can occur while building, parsing or encoding references.
///
/// All variants are recoverable data errors. The one programming-invariant
/// violation in this crate (rendering an undefined [`BinaryRef`] as a string)
/// panics instead of returning one of these.
///
/// [`BinaryRef`]: crate::BinaryRef
#[derive(Debug, Error)]
pub enum RefError {
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("unknown binary reference discriminant: {0:#04x}")]
    UnknownDiscriminant(u8),

    #[error("reference kind mismatch: expected {expected}, has {actual}")]
    KindMismatch { expected: RefType, actual: RefType },

    #[error("unsupported content algorithm for binary encoding: {0}")]
    UnsupportedContentAlgorithm(RefAlgo),

    #[error("decoded content reference has invalid algorithm: {0}")]
    InvalidContentAlgorithm(RefAlgo),

    #[error("unsupported reference type: {0}")]
    UnsupportedReferenceType(&'static str),

    #[error("invalid public key length: expected 32 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("binary reference has no variant set")]
    AllVariantsEmpty,

    #[error("algorithm {algo} is not valid for {kind} references")]
    AlgorithmMismatch { kind: &'static str, algo: RefAlgo },

    #[error("invalid reference sigil: {0:?}")]
    InvalidSigil(char),

    #[error("unknown reference algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("malformed reference: {0}")]
    MalformedRef(String),

    #[error("base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("json error: {0}")]
    Json(String),
}

/// Result type for reference operations.
pub type Result<T> = std::result::Result<T, RefError>;
