//! Identity newtypes
//!
//! Wallet addresses are opaque, caller-owned strings compared
//! case-insensitively. Normalization happens once, at construction, so the
//! canonical lowercase form is what every map key and serialized record sees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet address identifying an actor. Never generated internally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Normalize an address to its canonical lowercase form.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form for logs: `0x1234…abcd`. Addresses are opaque
    /// caller-owned strings, so truncation is by character, not byte.
    pub fn abbreviated(&self) -> String {
        let total = self.0.chars().count();
        if total <= 12 {
            return self.0.clone();
        }
        let head: String = self.0.chars().take(6).collect();
        let tail: String = self.0.chars().skip(total - 4).collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier for a posted job, assigned by the poster at creation time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh id for a new posting.
    pub fn generate() -> Self {
        Self(format!("job-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn addresses_compare_case_insensitively() {
        let a = WalletAddress::new("0xABCDef012345");
        let b = WalletAddress::new("0xabcdef012345");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef012345");
    }

    #[test]
    fn abbreviation_keeps_short_addresses_intact() {
        let short = WalletAddress::new("0xabc123");
        assert_eq!(short.abbreviated(), "0xabc123");

        let long = WalletAddress::new("0x1234567890abcdef");
        assert_eq!(long.abbreviated(), "0x1234…cdef");
    }

    #[test]
    fn abbreviation_handles_multi_byte_addresses() {
        // Addresses are opaque strings; nothing restricts them to ASCII.
        let address = WalletAddress::new("wallet-ÅÄÖ-äöü-0123456789");
        let abbreviated = address.abbreviated();
        assert!(abbreviated.contains('…'));
        assert!(abbreviated.starts_with("wallet"));
        assert!(abbreviated.ends_with("6789"));
    }

    #[test]
    fn generated_job_ids_are_unique() {
        assert_ne!(JobId::generate(), JobId::generate());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,64}") {
            let once = WalletAddress::new(raw);
            let twice = WalletAddress::new(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn abbreviation_never_panics(raw in "\\PC{0,64}") {
            let address = WalletAddress::new(raw);
            let abbreviated = address.abbreviated();
            prop_assert!(abbreviated.chars().count() <= address.as_str().chars().count().max(11));
        }
    }
}
