use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use zidi_common::address::SettlementAddress;

/// A subscriber's savings account.
///
/// Created exactly once on successful join and never deleted. The balance
/// only moves through `Ledger::credit` / `Ledger::debit`, each of which
/// appends exactly one matching entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable subscriber identifier, e.g. "+254123456789". Unique.
    pub phone: String,
    /// 4-digit PIN, set once at join and compared as an exact string.
    /// Stored in the clear; prototype simplification, not production-grade.
    pub pin: String,
    /// Mock settlement address derived from the phone at join time. Unique.
    pub external_address: SettlementAddress,
    /// Current cUSD balance. Never negative.
    pub balance: Decimal,
}

impl Account {
    pub fn new(phone: String, pin: String) -> Self {
        let external_address = SettlementAddress::derive(&phone);
        Self {
            phone,
            pin,
            external_address,
            balance: Decimal::ZERO,
        }
    }
}
