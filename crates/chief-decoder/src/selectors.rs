//! # Function Selector Registry
//!
//! The six chief operations, keyed by the leading 4 bytes of their call
//! data. Selectors are derived once from the canonical signature text via
//! keccak-256 and held in a process-lifetime registry.

use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Selector length in bytes (8 hex characters on the wire).
pub const SELECTOR_SIZE: usize = 4;

/// The six governance operations the replay understands.
///
/// `Vote` and `VoteSlate` are distinct on-chain entry points: `vote(address[])`
/// etches a slate and endorses it in one call, `vote(bytes32)` endorses an
/// already-etched slate by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Vote,
    VoteSlate,
    Etch,
    Lift,
    Lock,
    Free,
}

impl OpKind {
    /// All operations, in a fixed order.
    pub const ALL: [OpKind; 6] = [
        OpKind::Vote,
        OpKind::VoteSlate,
        OpKind::Etch,
        OpKind::Lift,
        OpKind::Lock,
        OpKind::Free,
    ];

    /// Canonical Solidity signature the selector is derived from.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            OpKind::Vote => "vote(address[])",
            OpKind::VoteSlate => "vote(bytes32)",
            OpKind::Etch => "etch(address[])",
            OpKind::Lift => "lift(address)",
            OpKind::Lock => "lock(uint256)",
            OpKind::Free => "free(uint256)",
        }
    }

    /// The 4-byte selector: leading bytes of keccak-256 over the signature.
    #[must_use]
    pub fn selector(&self) -> [u8; 4] {
        selector_of(self.signature())
    }
}

/// Selector lookup table, built once for the process lifetime.
static SELECTORS: LazyLock<HashMap<[u8; 4], OpKind>> = LazyLock::new(|| {
    OpKind::ALL
        .iter()
        .map(|op| (op.selector(), *op))
        .collect()
});

/// Computes the 4-byte selector for a function signature.
fn selector_of(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..SELECTOR_SIZE]);
    selector
}

/// Looks up the operation invoked by raw selector bytes.
#[must_use]
pub fn lookup(selector: &[u8; 4]) -> Option<OpKind> {
    SELECTORS.get(selector).copied()
}

/// Selector-only probe: which operation does this call data invoke, if any?
///
/// Cheaper than a full decode; used for grouping and for the locked-amount
/// time series which only cares about two of the six operations.
#[must_use]
pub fn classify(input: &str) -> Option<OpKind> {
    let digits = input.strip_prefix("0x")?;
    let head = digits.get(..SELECTOR_SIZE * 2)?;
    let mut selector = [0u8; 4];
    hex::decode_to_slice(head, &mut selector).ok()?;
    lookup(&selector)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Selectors of the deployed chief contract, straight from etherscan.
    #[test]
    fn test_selectors_match_deployed_contract() {
        assert_eq!(OpKind::Vote.selector(), [0xed, 0x08, 0x13, 0x29]);
        assert_eq!(OpKind::VoteSlate.selector(), [0xa6, 0x9b, 0xea, 0xba]);
        assert_eq!(OpKind::Etch.selector(), [0x51, 0x23, 0xe1, 0xfa]);
        assert_eq!(OpKind::Lift.selector(), [0x3c, 0x27, 0x8b, 0xd5]);
        assert_eq!(OpKind::Lock.selector(), [0xdd, 0x46, 0x70, 0x64]);
        assert_eq!(OpKind::Free.selector(), [0xd8, 0xcc, 0xd0, 0xf3]);
    }

    #[test]
    fn test_selectors_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for op in OpKind::ALL {
            assert!(seen.insert(op.selector()), "duplicate selector for {op:?}");
        }
    }

    #[test]
    fn test_classify_known_call() {
        assert_eq!(classify("0xdd467064"), Some(OpKind::Lock));
        assert_eq!(
            classify("0xdd467064000000000000000000000000000000000000000000000001158e460913d00000"),
            Some(OpKind::Lock)
        );
    }

    #[test]
    fn test_classify_unknown_or_malformed() {
        assert_eq!(classify("0xdeadbeef"), None);
        assert_eq!(classify("0x"), None);
        assert_eq!(classify("0xdd46"), None);
        assert_eq!(classify("dd467064"), None);
        assert_eq!(classify("0xzz467064"), None);
    }
}
