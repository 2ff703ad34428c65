//! Gateway callback types and transaction identifiers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One USSD callback as posted by the dial-session gateway.
///
/// `text` is the full accumulated `*`-joined input history for the session,
/// empty on first contact. The gateway re-sends the whole history on every
/// callback, so the server reconstructs the menu position from it each time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UssdRequest {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "text", default)]
    pub text: String,
}

/// Derives the mock settlement transaction id for one logical operation of
/// one session (`0x` + 64 hex chars, the shape of a real tx hash).
///
/// The same session retrying the same operation derives the same id, which
/// is what makes it usable as the ledger's idempotency key.
pub fn external_tx_id(session_id: &str, kind: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", session_id, kind).as_bytes());
    format!("0x{}", hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_id_stable_per_session_and_kind() {
        assert_eq!(
            external_tx_id("ATUid_1", "deposit"),
            external_tx_id("ATUid_1", "deposit")
        );
    }

    #[test]
    fn test_tx_id_varies_by_kind_and_session() {
        assert_ne!(
            external_tx_id("ATUid_1", "deposit"),
            external_tx_id("ATUid_1", "withdraw")
        );
        assert_ne!(
            external_tx_id("ATUid_1", "deposit"),
            external_tx_id("ATUid_2", "deposit")
        );
    }

    #[test]
    fn test_tx_id_shape() {
        let id = external_tx_id("s", "deposit");
        assert!(id.starts_with("0x"));
        assert_eq!(id.len(), 66);
    }
}
