//! # History Builder
//!
//! Left fold of the state machine over an ordered transaction log, plus the
//! narrower locked-amount time series. Both are pure functions of their
//! input: re-running them on the same log yields the same timeline.

use crate::errors::ReplayError;
use crate::state::GovernanceState;
use chief_decoder::{decode, DecodeError, DecodedCall};
use chief_types::{Transaction, Wad};
use tracing::warn;

/// Replays an ordered log into one snapshot per transaction.
///
/// The caller supplies successful transactions in ascending timestamp order
/// (ties keep log order). Undecodable entries advance only the timestamp;
/// they never abort the fold.
///
/// # Errors
///
/// - `EmptyLog` when no transactions are supplied
/// - `OutOfOrder` on the first timestamp regression
pub fn replay(transactions: &[Transaction]) -> Result<Vec<GovernanceState>, ReplayError> {
    if transactions.is_empty() {
        return Err(ReplayError::EmptyLog);
    }
    if let Some(position) = first_regression(transactions) {
        return Err(ReplayError::OutOfOrder { position });
    }

    let mut states = Vec::with_capacity(transactions.len());
    let mut state = GovernanceState::new();
    for tx in transactions {
        state = step(&state, tx);
        states.push(state.clone());
    }
    Ok(states)
}

/// Advances the state by one transaction.
///
/// An unrecognized selector is an everyday occurrence in a raw log and is
/// skipped silently; malformed call data for a known selector is skipped
/// with a warning. Either way the snapshot's timestamp advances.
#[must_use]
pub fn step(prior: &GovernanceState, tx: &Transaction) -> GovernanceState {
    match decode(tx) {
        Ok(call) => prior.apply(&call, tx),
        Err(DecodeError::UnrecognizedOperation) => prior.touch(tx),
        Err(err) => {
            warn!(hash = %tx.hash, error = %err, "skipping transaction with undecodable call data");
            prior.touch(tx)
        }
    }
}

fn first_regression(transactions: &[Transaction]) -> Option<usize> {
    transactions
        .windows(2)
        .position(|pair| pair[1].time_stamp < pair[0].time_stamp)
        .map(|i| i + 1)
}

/// One point of the locked-amount time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedPoint {
    /// Running net Lock − Free in wei. Signed: a partial log can dip below
    /// zero.
    pub net_locked: i128,
    /// Timestamp of the lock/free event.
    pub timestamp: u64,
}

impl LockedPoint {
    /// Whole-token view for reporting.
    #[must_use]
    pub fn tokens(&self) -> f64 {
        self.net_locked as f64 / Wad::WAD as f64
    }
}

/// Running net locked amount over time, one point per lock/free event.
///
/// Ignores all slate and vote bookkeeping; a convenience view for
/// time-series consumers.
#[must_use]
pub fn locked_amount_evolution(transactions: &[Transaction]) -> Vec<LockedPoint> {
    let mut net: i128 = 0;
    let mut points = Vec::new();
    for tx in transactions {
        let moved = match decode(tx) {
            Ok(DecodedCall::Lock { amount }) => signed_wei(amount),
            Ok(DecodedCall::Free { amount }) => -signed_wei(amount),
            _ => continue,
        };
        net = net.saturating_add(moved);
        points.push(LockedPoint {
            net_locked: net,
            timestamp: tx.time_stamp,
        });
    }
    points
}

fn signed_wei(amount: Wad) -> i128 {
    i128::try_from(amount.wei()).unwrap_or(i128::MAX)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chief_decoder::OpKind;
    use chief_types::Address;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn tx(sender: Address, input: String, time_stamp: u64) -> Transaction {
        Transaction {
            hash: format!("0x{time_stamp:x}"),
            from: sender,
            input,
            time_stamp,
            is_error: "0".into(),
        }
    }

    fn lock_input(tokens: u128) -> String {
        format!(
            "0x{}{:064x}",
            hex_selector(OpKind::Lock),
            tokens * Wad::WAD
        )
    }

    fn free_input(tokens: u128) -> String {
        format!(
            "0x{}{:064x}",
            hex_selector(OpKind::Free),
            tokens * Wad::WAD
        )
    }

    fn hex_selector(op: OpKind) -> String {
        hex::encode(op.selector())
    }

    #[test]
    fn test_replay_rejects_empty_log() {
        assert_eq!(replay(&[]), Err(ReplayError::EmptyLog));
    }

    #[test]
    fn test_replay_rejects_timestamp_regression() {
        let txs = vec![
            tx(addr(1), lock_input(1), 10),
            tx(addr(1), lock_input(1), 20),
            tx(addr(1), lock_input(1), 15),
        ];
        assert_eq!(replay(&txs), Err(ReplayError::OutOfOrder { position: 2 }));
    }

    #[test]
    fn test_replay_accepts_equal_timestamps() {
        let txs = vec![
            tx(addr(1), lock_input(1), 10),
            tx(addr(2), lock_input(2), 10),
        ];
        let states = replay(&txs).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].deposit_of(&addr(1)), Wad::from_tokens(1));
        assert_eq!(states[1].deposit_of(&addr(2)), Wad::from_tokens(2));
    }

    #[test]
    fn test_replay_emits_one_snapshot_per_transaction() {
        let txs = vec![
            tx(addr(1), lock_input(5), 1),
            tx(addr(1), "0xdeadbeef".into(), 2),
            tx(addr(1), free_input(2), 3),
        ];
        let states = replay(&txs).unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].deposit_of(&addr(1)), Wad::from_tokens(5));
        // foreign call: only the timestamp advanced
        assert_eq!(states[1].deposit_of(&addr(1)), Wad::from_tokens(5));
        assert_eq!(states[1].timestamp(), Some(2));
        assert_eq!(states[2].deposit_of(&addr(1)), Wad::from_tokens(3));
    }

    #[test]
    fn test_step_skips_malformed_call_data_with_unchanged_state() {
        let prior = step(&GovernanceState::new(), &tx(addr(1), lock_input(5), 1));
        // lock selector with a truncated argument word
        let broken = tx(addr(1), format!("0x{}00ff", hex_selector(OpKind::Lock)), 2);
        let next = step(&prior, &broken);
        assert_eq!(next.deposit_of(&addr(1)), prior.deposit_of(&addr(1)));
        assert_eq!(next.timestamp(), Some(2));
    }

    #[test]
    fn test_locked_amount_evolution_tracks_net() {
        let txs = vec![
            tx(addr(1), lock_input(10), 1),
            tx(addr(2), "0xdeadbeef".into(), 2),
            tx(addr(1), free_input(4), 3),
            tx(addr(2), lock_input(1), 4),
        ];
        let points = locked_amount_evolution(&txs);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].net_locked, 10 * Wad::WAD as i128);
        assert_eq!(points[1].net_locked, 6 * Wad::WAD as i128);
        assert_eq!(points[2].net_locked, 7 * Wad::WAD as i128);
        assert_eq!(points[2].timestamp, 4);
        assert!((points[1].tokens() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_locked_amount_evolution_can_dip_negative() {
        let txs = vec![tx(addr(1), free_input(3), 1)];
        let points = locked_amount_evolution(&txs);
        assert_eq!(points[0].net_locked, -3 * Wad::WAD as i128);
    }
}
