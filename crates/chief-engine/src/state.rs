//! # Governance State
//!
//! One immutable snapshot of the chief contract per processed transaction:
//! locked deposits, the slate registry, per-address votes, the approval
//! weight behind each candidate, and the currently lifted hat.
//!
//! Snapshots share structure: the four maps live behind `Arc`s, cloning a
//! snapshot is a handful of refcount bumps, and applying an operation copies
//! only the maps that operation actually touches. A snapshot is never
//! mutated after it is emitted.
//!
//! ## Weight accounting
//!
//! The maintained invariant: for every candidate `c`, `approvals[c]` equals
//! the sum of `deposits[a]` over every address `a` whose current vote names
//! a registered slate containing `c`. Lock, free, and vote are the only
//! operations that move weight, and each moves exactly the amount that
//! keeps this balanced.

use crate::slate::slate_hash;
use chief_decoder::DecodedCall;
use chief_types::{Address, SlateHash, Transaction, Wad};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Immutable governance snapshot.
///
/// The zero value (`Default`) is the state before any transaction: no
/// deposits, no votes, no slates, no hat, no timestamp.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GovernanceState {
    deposits: Arc<HashMap<Address, Wad>>,
    votes: Arc<HashMap<Address, SlateHash>>,
    approvals: Arc<HashMap<Address, Wad>>,
    slates: Arc<HashMap<SlateHash, Vec<Address>>>,
    hat: Option<Address>,
    timestamp: Option<u64>,
}

impl GovernanceState {
    /// The zero state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locked deposit of an address (zero if never locked).
    #[must_use]
    pub fn deposit_of(&self, address: &Address) -> Wad {
        self.deposits.get(address).copied().unwrap_or(Wad::ZERO)
    }

    /// Total weight currently backing a candidate (zero if none).
    #[must_use]
    pub fn approval_of(&self, candidate: &Address) -> Wad {
        self.approvals.get(candidate).copied().unwrap_or(Wad::ZERO)
    }

    /// The slate an address currently endorses, if it ever voted.
    #[must_use]
    pub fn vote_of(&self, address: &Address) -> Option<SlateHash> {
        self.votes.get(address).copied()
    }

    /// Candidate list of a registered slate.
    #[must_use]
    pub fn slate(&self, hash: &SlateHash) -> Option<&[Address]> {
        self.slates.get(hash).map(Vec::as_slice)
    }

    /// The most recently lifted address, if any.
    #[must_use]
    pub const fn hat(&self) -> Option<Address> {
        self.hat
    }

    /// Timestamp of the transaction that produced this snapshot.
    #[must_use]
    pub const fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Full deposit map view.
    #[must_use]
    pub fn deposits(&self) -> &HashMap<Address, Wad> {
        &self.deposits
    }

    /// Full vote map view.
    #[must_use]
    pub fn votes(&self) -> &HashMap<Address, SlateHash> {
        &self.votes
    }

    /// Full approval map view.
    #[must_use]
    pub fn approvals(&self) -> &HashMap<Address, Wad> {
        &self.approvals
    }

    /// Full slate registry view.
    #[must_use]
    pub fn slates(&self) -> &HashMap<SlateHash, Vec<Address>> {
        &self.slates
    }

    /// Applies one decoded call, returning the next snapshot.
    ///
    /// Pure: `self` is untouched; the result shares every map the operation
    /// did not modify.
    #[must_use]
    pub fn apply(&self, call: &DecodedCall, tx: &Transaction) -> Self {
        let mut next = self.clone();
        next.timestamp = Some(tx.time_stamp);
        match call {
            DecodedCall::Lock { amount } => next.lock(tx.from, *amount),
            DecodedCall::Free { amount } => next.free(tx.from, *amount),
            DecodedCall::Etch { addresses } => {
                next.etch(addresses);
            }
            DecodedCall::Vote { addresses } => {
                let slate = next.etch(addresses);
                next.vote_slate(tx.from, slate);
            }
            DecodedCall::VoteSlate { slate } => next.vote_slate(tx.from, *slate),
            DecodedCall::Lift { address } => next.hat = Some(*address),
        }
        next
    }

    /// Advances only the timestamp, for transactions the fold skips.
    #[must_use]
    pub fn touch(&self, tx: &Transaction) -> Self {
        let mut next = self.clone();
        next.timestamp = Some(tx.time_stamp);
        next
    }

    /// Lock: raise the sender's deposit, then back every candidate of the
    /// sender's current slate with the same amount.
    fn lock(&mut self, sender: Address, amount: Wad) {
        let deposits = Arc::make_mut(&mut self.deposits);
        let deposit = deposits.entry(sender).or_insert(Wad::ZERO);
        *deposit = deposit.saturating_add(amount);

        let slate = self.votes.get(&sender).copied();
        self.add_weight(amount, slate.as_ref());
    }

    /// Free: the exact inverse of lock. The effective amount is clamped to
    /// the sender's deposit so that deposits and approvals move in lockstep
    /// even on a log that frees more than it locked.
    fn free(&mut self, sender: Address, amount: Wad) {
        let deposits = Arc::make_mut(&mut self.deposits);
        let deposit = deposits.entry(sender).or_insert(Wad::ZERO);
        let effective = amount.min(*deposit);
        if effective < amount {
            warn!(
                sender = %sender,
                deposit = %deposit,
                freed = %amount,
                "free exceeds locked deposit, clamping"
            );
        }
        *deposit = deposit.saturating_sub(effective);

        let slate = self.votes.get(&sender).copied();
        self.sub_weight(effective, slate.as_ref());
    }

    /// Etch: register the slate if new. Idempotent, moves no weight.
    fn etch(&mut self, addresses: &[Address]) -> SlateHash {
        let hash = slate_hash(addresses);
        if !self.slates.contains_key(&hash) {
            Arc::make_mut(&mut self.slates).insert(hash, addresses.to_vec());
        }
        hash
    }

    /// Vote: move the sender's full deposit weight from the previously
    /// endorsed slate to the new one.
    ///
    /// A hash absent from the registry is a warnable anomaly, not a failure:
    /// it behaves as an empty candidate list and receives no weight.
    fn vote_slate(&mut self, sender: Address, slate: SlateHash) {
        if !self.slates.contains_key(&slate) {
            warn!(slate = %slate, sender = %sender, "vote references a slate missing from the registry");
        }
        let weight = self.deposit_of(&sender);
        let previous = self.votes.get(&sender).copied();
        self.sub_weight(weight, previous.as_ref());
        Arc::make_mut(&mut self.votes).insert(sender, slate);
        self.add_weight(weight, Some(&slate));
    }

    fn add_weight(&mut self, weight: Wad, slate: Option<&SlateHash>) {
        let Some(slate) = slate else { return };
        let Some(candidates) = self.slates.get(slate) else {
            return;
        };
        let approvals = Arc::make_mut(&mut self.approvals);
        for candidate in candidates {
            let approval = approvals.entry(*candidate).or_insert(Wad::ZERO);
            *approval = approval.saturating_add(weight);
        }
    }

    fn sub_weight(&mut self, weight: Wad, slate: Option<&SlateHash>) {
        let Some(slate) = slate else { return };
        let Some(candidates) = self.slates.get(slate) else {
            return;
        };
        let approvals = Arc::make_mut(&mut self.approvals);
        for candidate in candidates {
            let approval = approvals.entry(*candidate).or_insert(Wad::ZERO);
            *approval = match approval.checked_sub(weight) {
                Some(remaining) => remaining,
                None => {
                    warn!(
                        candidate = %candidate,
                        approval = %approval,
                        removed = %weight,
                        "approval underflow, clamping at zero"
                    );
                    Wad::ZERO
                }
            };
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
