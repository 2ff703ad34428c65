use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Deposit,
    Withdraw,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "deposit",
            EntryKind::Withdraw => "withdraw",
        }
    }
}

/// One immutable ledger movement. Append-only; never mutated or deleted.
///
/// `external_tx_id` is the mock settlement transaction id derived from the
/// session and operation kind; it doubles as the idempotency key, so a
/// replayed callback finds the existing entry instead of creating another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: String,
    /// Owning account, by phone number.
    pub phone: String,
    pub external_tx_id: String,
    /// Always positive; the direction is carried by `kind`.
    pub amount: Decimal,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(phone: String, external_tx_id: String, amount: Decimal, kind: EntryKind) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            phone,
            external_tx_id,
            amount,
            kind,
            created_at: Utc::now(),
        }
    }

    /// The amount with its sign applied: positive for deposits, negative
    /// for withdrawals.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Deposit => self.amount,
            EntryKind::Withdraw => -self.amount,
        }
    }
}
