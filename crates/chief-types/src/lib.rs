//! # chief-types
//!
//! Shared domain primitives for the chief-replay workspace.
//!
//! ## Role in System
//!
//! - **Value objects**: `Address`, `SlateHash`, `Wad` — the currency of the
//!   decoder and the state machine
//! - **Transaction record**: the raw explorer log entry the replay consumes
//!
//! This crate has minimal dependencies so both the decoder and the engine
//! can build on it without pulling in hashing or logging machinery.

pub mod errors;
pub mod transaction;
pub mod value_objects;

pub use errors::ParseError;
pub use transaction::Transaction;
pub use value_objects::{Address, SlateHash, Wad};
