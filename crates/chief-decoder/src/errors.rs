use crate::selectors::OpKind;
use thiserror::Error;

/// Errors raised while decoding a transaction's call data.
///
/// None of these abort a replay: an unrecognized selector is skipped
/// silently, the rest are skipped with a warning.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("call data selector does not match any known chief operation")]
    UnrecognizedOperation,

    #[error("call data too short for {op:?}: argument tail needs {expected} bytes, got {actual}")]
    MalformedCallData {
        op: OpKind,
        expected: usize,
        actual: usize,
    },

    #[error("{op:?} amount word exceeds 128 bits")]
    AmountOverflow { op: OpKind },

    #[error("call data is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
