use thiserror::Error;

/// Errors raised while parsing hex-encoded primitives.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
