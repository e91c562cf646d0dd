//! # Slate Hashing
//!
//! A slate is identified by the keccak-256 digest of its candidate list in
//! ABI-packed form: each address left-padded to a 32-byte word, concatenated
//! in list order. Order matters — `[A, B]` and `[B, A]` are distinct slates.

use chief_types::{Address, SlateHash};
use sha3::{Digest, Keccak256};

/// Derives the slate identifier for an ordered candidate list.
#[must_use]
pub fn slate_hash(addresses: &[Address]) -> SlateHash {
    let mut hasher = Keccak256::new();
    for address in addresses {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(address.as_bytes());
        hasher.update(word);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    SlateHash::new(out)
}

// =============================================================================
// TESTS
// =============================================================================
