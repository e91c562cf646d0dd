//! # Transaction Record
//!
//! The raw explorer log entry the replay consumes. Field names and shapes
//! follow the Etherscan account-transaction JSON: integers arrive as decimal
//! strings, success is flagged by `isError == "0"`.

use crate::value_objects::Address;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One raw transaction from an ordered governance log.
///
/// The replay engine only reads `from`, `input`, and `time_stamp`; `hash`
/// is carried for log messages and `is_error` for the caller-side success
/// filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash, kept verbatim for diagnostics.
    pub hash: String,
    /// Sender address.
    pub from: Address,
    /// Call data: `0x`, a 4-byte selector, then ABI-encoded argument words.
    pub input: String,
    /// Block timestamp in epoch seconds. Explorers emit this as a string.
    #[serde(rename = "timeStamp", deserialize_with = "u64_from_string_or_number")]
    pub time_stamp: u64,
    /// `"0"` for a successful transaction, `"1"` for a reverted one.
    #[serde(rename = "isError", default = "default_is_error")]
    pub is_error: String,
}

impl Transaction {
    /// Returns true if the transaction executed without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.is_error == "0"
    }
}

fn default_is_error() -> String {
    "0".to_string()
}

/// Accepts both `"1549383977"` and `1549383977` for timestamps.
fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimestampVisitor;

    impl serde::de::Visitor<'_> for TimestampVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an epoch-seconds integer or decimal string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}

// =============================================================================
// TESTS
// =============================================================================
