//! # chief-decoder
//!
//! Calldata decoder for the six chief governance operations.
//!
//! ## Role in System
//!
//! - **Selector registry**: maps 4-byte function selectors (keccak-256 of the
//!   canonical signature) to operations
//! - **Word reader**: fixed-width 32-byte word cursor over the ABI-encoded
//!   argument tail
//! - **`DecodedCall`**: closed tagged union over the six operations, consumed
//!   by the replay engine's exhaustive match
//!
//! Anything that is not one of the six known calls decodes to
//! `DecodeError::UnrecognizedOperation`; arbitrary other contract calls show
//! up in real logs and are skipped by the fold, not treated as failures.

pub mod call;
pub mod errors;
pub mod reader;
pub mod selectors;

pub use call::{decode, decode_input, group_by_kind, DecodedCall};
pub use errors::DecodeError;
pub use reader::CalldataReader;
pub use selectors::{classify, OpKind};
