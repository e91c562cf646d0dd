//! # chief-engine
//!
//! Governance state machine and history builder for chief replay.
//!
//! ## Role in System
//!
//! - **State machine**: folds decoded calls into immutable [`GovernanceState`]
//!   snapshots, one per transaction
//! - **History builder**: [`replay`] runs the fold over an ordered log and
//!   returns the full snapshot timeline; [`locked_amount_evolution`] is the
//!   narrower lock/free time series
//! - **Slate hashing**: [`slate_hash`] derives the order-sensitive 32-byte
//!   slate identifier from a candidate list
//!
//! The engine is a pure, single-pass, in-memory fold: no I/O, no hidden
//! process state, no mutation of previously emitted snapshots. Recoverable
//! anomalies (undecodable call data, votes for unregistered slates) are
//! logged and skipped; the only fatal errors are an empty or
//! non-chronological input log.

pub mod errors;
pub mod history;
pub mod slate;
pub mod state;

pub use errors::ReplayError;
pub use history::{locked_amount_evolution, replay, step, LockedPoint};
pub use slate::slate_hash;
pub use state::GovernanceState;
