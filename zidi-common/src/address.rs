//! Mock settlement addresses.
//!
//! Each subscriber gets a deterministic address derived from their phone
//! number at join time. It stands in for a Celo account reference in test
//! mode and carries no cryptographic meaning.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A derived settlement address (`0x` + 40 lowercase hex chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementAddress(String);

impl SettlementAddress {
    /// Derives the address for a phone number. Same phone, same address,
    /// on every node and every run.
    pub fn derive(phone: &str) -> Self {
        let digest = Sha256::digest(phone.as_bytes());
        let hex = hex::encode(digest);
        SettlementAddress(format!("0x{}", &hex[..40]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for SettlementAddress {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for SettlementAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
