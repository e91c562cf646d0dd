//! # Decoded Governance Calls
//!
//! The closed tagged union over the six chief operations, and the decoder
//! that extracts it from raw call data.

use crate::errors::DecodeError;
use crate::reader::{CalldataReader, Truncated, WORD_SIZE};
use crate::selectors::{self, OpKind, SELECTOR_SIZE};
use chief_types::{Address, SlateHash, Transaction, Wad};
use std::collections::HashMap;

/// One decoded governance call with its typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedCall {
    /// Etch a slate from the given candidates and endorse it in one call.
    Vote { addresses: Vec<Address> },
    /// Endorse an already-etched slate by hash.
    VoteSlate { slate: SlateHash },
    /// Register a slate without endorsing it.
    Etch { addresses: Vec<Address> },
    /// Elect an address as the active hat.
    Lift { address: Address },
    /// Lock deposit weight.
    Lock { amount: Wad },
    /// Release deposit weight.
    Free { amount: Wad },
}

impl DecodedCall {
    /// The operation this call invokes.
    #[must_use]
    pub const fn kind(&self) -> OpKind {
        match self {
            DecodedCall::Vote { .. } => OpKind::Vote,
            DecodedCall::VoteSlate { .. } => OpKind::VoteSlate,
            DecodedCall::Etch { .. } => OpKind::Etch,
            DecodedCall::Lift { .. } => OpKind::Lift,
            DecodedCall::Lock { .. } => OpKind::Lock,
            DecodedCall::Free { .. } => OpKind::Free,
        }
    }
}

/// Decodes a transaction's call data into a governance call.
///
/// # Errors
///
/// - `UnrecognizedOperation` when the selector matches none of the six
///   known signatures (or the input has no selector at all)
/// - `MalformedCallData` when the argument tail is shorter than the matched
///   operation requires
/// - `AmountOverflow` when a lock/free amount exceeds 128 bits
/// - `InvalidHex` when the input is not hex at all
pub fn decode(tx: &Transaction) -> Result<DecodedCall, DecodeError> {
    decode_input(&tx.input)
}

/// Decodes raw `0x`-prefixed call data. See [`decode`].
pub fn decode_input(input: &str) -> Result<DecodedCall, DecodeError> {
    let digits = input
        .strip_prefix("0x")
        .ok_or(DecodeError::UnrecognizedOperation)?;
    let bytes = hex::decode(digits)?;
    if bytes.len() < SELECTOR_SIZE {
        return Err(DecodeError::UnrecognizedOperation);
    }

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&bytes[..SELECTOR_SIZE]);
    let op = selectors::lookup(&selector).ok_or(DecodeError::UnrecognizedOperation)?;

    let mut reader = CalldataReader::new(&bytes[SELECTOR_SIZE..]);
    let call = match op {
        OpKind::Vote => DecodedCall::Vote {
            addresses: read_address_list(op, &mut reader)?,
        },
        OpKind::Etch => DecodedCall::Etch {
            addresses: read_address_list(op, &mut reader)?,
        },
        OpKind::VoteSlate => DecodedCall::VoteSlate {
            slate: reader.read_hash().map_err(|t| malformed(op, t))?,
        },
        OpKind::Lift => DecodedCall::Lift {
            address: reader.read_address().map_err(|t| malformed(op, t))?,
        },
        OpKind::Lock => DecodedCall::Lock {
            amount: read_amount(op, &mut reader)?,
        },
        OpKind::Free => DecodedCall::Free {
            amount: read_amount(op, &mut reader)?,
        },
    };
    Ok(call)
}

/// Groups transactions by the operation their selector invokes.
///
/// Transactions that match none of the six operations are dropped. A
/// convenience view over raw logs; the replay itself never reorders.
#[must_use]
pub fn group_by_kind(transactions: &[Transaction]) -> HashMap<OpKind, Vec<&Transaction>> {
    let mut grouped: HashMap<OpKind, Vec<&Transaction>> = HashMap::new();
    for tx in transactions {
        if let Some(op) = selectors::classify(&tx.input) {
            grouped.entry(op).or_default().push(tx);
        }
    }
    grouped
}

/// Dynamic address array: offset head word, length word, then one word per
/// element with the address right-aligned.
fn read_address_list(
    op: OpKind,
    reader: &mut CalldataReader,
) -> Result<Vec<Address>, DecodeError> {
    reader.skip_word().map_err(|t| malformed(op, t))?;
    let count = reader.read_u256().map_err(|t| malformed(op, t))?;

    let available_words = reader.remaining() / WORD_SIZE;
    if count > primitive_types::U256::from(available_words) {
        let claimed = if count.bits() > 64 {
            usize::MAX
        } else {
            (count.low_u64() as usize).saturating_mul(WORD_SIZE)
        };
        return Err(DecodeError::MalformedCallData {
            op,
            expected: claimed.saturating_add(WORD_SIZE * 2),
            actual: WORD_SIZE * 2 + reader.remaining(),
        });
    }

    let count = count.low_u64() as usize;
    let mut addresses = Vec::with_capacity(count);
    for _ in 0..count {
        addresses.push(reader.read_address().map_err(|t| malformed(op, t))?);
    }
    Ok(addresses)
}

/// Single uint256 word in wei, narrowed to `Wad`.
fn read_amount(op: OpKind, reader: &mut CalldataReader) -> Result<Wad, DecodeError> {
    let value = reader.read_u256().map_err(|t| malformed(op, t))?;
    if value.bits() > 128 {
        return Err(DecodeError::AmountOverflow { op });
    }
    Ok(Wad::from_wei(value.as_u128()))
}

fn malformed(op: OpKind, t: Truncated) -> DecodeError {
    DecodeError::MalformedCallData {
        op,
        expected: t.expected,
        actual: t.actual,
    }
}

// =============================================================================
// TESTS
// =============================================================================
