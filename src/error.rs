//! Error types for key, point, and signature handling.

use thiserror::Error;

/// Errors produced while decoding or validating keys, points, scalars, and
/// signatures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input is not valid for its declared encoding, or the decoded
    /// length does not match the expected 32 or 64 bytes.
    #[error("invalid encoding: {0}")]
    Decode(String),

    /// A compressed point does not decode to a point on the curve.
    #[error("invalid curve point: {0}")]
    InvalidPoint(&'static str),

    /// Signature bytes are malformed. Distinct from a well-formed signature
    /// which merely fails verification.
    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    /// A scalar is outside the valid range for the operation.
    #[error("scalar out of range")]
    InvalidScalar,

    /// A degenerate key, e.g. a low-order X25519 input.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
}

/// A specialized [`Result`](core::result::Result) type for this crate.
pub type Result<T> = core::result::Result<T, Error>;
