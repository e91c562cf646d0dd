//! Shared helpers for the integration suites: raw calldata assembly and the
//! approval-consistency oracle.

#![allow(dead_code)]

use chief_decoder::OpKind;
use chief_engine::GovernanceState;
use chief_types::{Address, SlateHash, Transaction, Wad};
use std::collections::HashMap;

pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

pub fn tx(sender: Address, input: String, time_stamp: u64) -> Transaction {
    Transaction {
        hash: format!("0x{time_stamp:064x}"),
        from: sender,
        input,
        time_stamp,
        is_error: "0".into(),
    }
}

fn selector_hex(op: OpKind) -> String {
    hex::encode(op.selector())
}

fn address_word(address: &Address) -> String {
    format!("{:0>64}", hex::encode(address.as_bytes()))
}

fn u128_word(value: u128) -> String {
    format!("{value:064x}")
}

fn address_list_input(op: OpKind, addresses: &[Address]) -> String {
    let mut input = format!("0x{}", selector_hex(op));
    input.push_str(&u128_word(32));
    input.push_str(&u128_word(addresses.len() as u128));
    for address in addresses {
        input.push_str(&address_word(address));
    }
    input
}

pub fn vote_input(addresses: &[Address]) -> String {
    address_list_input(OpKind::Vote, addresses)
}

pub fn etch_input(addresses: &[Address]) -> String {
    address_list_input(OpKind::Etch, addresses)
}

pub fn vote_slate_input(slate: &SlateHash) -> String {
    format!(
        "0x{}{}",
        selector_hex(OpKind::VoteSlate),
        hex::encode(slate.as_bytes())
    )
}

pub fn lift_input(address: &Address) -> String {
    format!("0x{}{}", selector_hex(OpKind::Lift), address_word(address))
}

pub fn lock_input(amount: Wad) -> String {
    format!("0x{}{}", selector_hex(OpKind::Lock), u128_word(amount.wei()))
}

pub fn free_input(amount: Wad) -> String {
    format!("0x{}{}", selector_hex(OpKind::Free), u128_word(amount.wei()))
}

/// The core accounting oracle: every candidate's approval weight must equal
/// the sum of deposits of all addresses whose current vote names a
/// registered slate containing that candidate (counted per occurrence).
pub fn approvals_consistent(state: &GovernanceState) -> bool {
    let mut expected: HashMap<Address, u128> = HashMap::new();
    for (voter, slate) in state.votes() {
        if let Some(candidates) = state.slate(slate) {
            let deposit = state.deposit_of(voter).wei();
            for candidate in candidates {
                *expected.entry(*candidate).or_default() += deposit;
            }
        }
    }

    let mut candidates: Vec<Address> = expected.keys().copied().collect();
    candidates.extend(state.approvals().keys().copied());
    candidates.iter().all(|candidate| {
        state.approval_of(candidate).wei() == expected.get(candidate).copied().unwrap_or(0)
    })
}
