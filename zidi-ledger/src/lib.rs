pub mod account;
pub mod entry;
pub mod error;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::info;

pub use account::Account;
pub use entry::{EntryKind, LedgerEntry};
pub use error::{LedgerError, Result};

#[derive(Debug, Default)]
struct State {
    /// phone -> account
    accounts: HashMap<String, Account>,
    /// Append-only movement history across all accounts.
    entries: Vec<LedgerEntry>,
    /// external_tx_id -> index into `entries`, for idempotent replays.
    by_tx_id: HashMap<String, usize>,
}

/// The durable account store.
///
/// All mutations run under one write lock, so "check, update balance,
/// append entry" is a single critical section: a partial application is
/// never observable, concurrent joins for one phone resolve to exactly one
/// winner, and concurrent debits cannot overdraw. Reads take the read lock
/// and run in parallel.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Arc<RwLock<State>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent create-or-fetch. Returns the account plus whether this
    /// call created it. An existing account comes back unmodified; PIN
    /// comparison is the caller's job, not the ledger's.
    pub async fn join(&self, phone: &str, pin: &str) -> Result<(Account, bool)> {
        let mut state = self.state.write().await;

        if let Some(existing) = state.accounts.get(phone) {
            return Ok((existing.clone(), false));
        }

        let account = Account::new(phone.to_string(), pin.to_string());
        if state
            .accounts
            .values()
            .any(|a| a.external_address == account.external_address)
        {
            return Err(LedgerError::AddressCollision(phone.to_string()));
        }

        info!(
            "join: phone={} address={}",
            account.phone, account.external_address
        );
        state.accounts.insert(phone.to_string(), account.clone());
        Ok((account, true))
    }

    pub async fn get_account(&self, phone: &str) -> Option<Account> {
        self.state.read().await.accounts.get(phone).cloned()
    }

    /// Increases the balance and appends a deposit entry, atomically.
    /// A duplicate `external_tx_id` is a no-op returning the prior entry.
    pub async fn credit(
        &self,
        phone: &str,
        amount: Decimal,
        external_tx_id: &str,
    ) -> Result<LedgerEntry> {
        self.apply(phone, amount, external_tx_id, EntryKind::Deposit)
            .await
    }

    /// Decreases the balance and appends a withdraw entry, atomically.
    /// Re-validates `balance >= amount` inside the critical section, so the
    /// balance can never go negative even under concurrent debits.
    /// Same idempotency contract as `credit`.
    pub async fn debit(
        &self,
        phone: &str,
        amount: Decimal,
        external_tx_id: &str,
    ) -> Result<LedgerEntry> {
        self.apply(phone, amount, external_tx_id, EntryKind::Withdraw)
            .await
    }

    async fn apply(
        &self,
        phone: &str,
        amount: Decimal,
        external_tx_id: &str,
        kind: EntryKind,
    ) -> Result<LedgerEntry> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let mut state = self.state.write().await;

        // Replayed callback: the movement already happened exactly once.
        if let Some(&idx) = state.by_tx_id.get(external_tx_id) {
            let existing = state
                .entries
                .get(idx)
                .cloned()
                .ok_or_else(|| LedgerError::Storage(format!("dangling tx index {}", idx)))?;
            info!(
                "{}: replay tx_id={} phone={}, returning existing entry",
                kind.as_str(),
                external_tx_id,
                phone
            );
            return Ok(existing);
        }

        let account = state
            .accounts
            .get_mut(phone)
            .ok_or_else(|| LedgerError::AccountNotFound(phone.to_string()))?;

        match kind {
            EntryKind::Deposit => account.balance += amount,
            EntryKind::Withdraw => {
                if account.balance < amount {
                    return Err(LedgerError::InsufficientBalance {
                        has: account.balance,
                        needs: amount,
                    });
                }
                account.balance -= amount;
            }
        }
        let new_balance = account.balance;

        let entry = LedgerEntry::new(
            phone.to_string(),
            external_tx_id.to_string(),
            amount,
            kind,
        );
        info!(
            "{}: phone={} amount={} tx_id={} balance={}",
            kind.as_str(),
            phone,
            amount,
            external_tx_id,
            new_balance
        );
        let idx = state.entries.len();
        state.by_tx_id.insert(external_tx_id.to_string(), idx);
        state.entries.push(entry.clone());
        Ok(entry)
    }

    /// Movement history for one account, oldest first.
    pub async fn entries_for(&self, phone: &str) -> Vec<LedgerEntry> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .filter(|e| e.phone == phone)
            .cloned()
            .collect()
    }

    pub async fn all_accounts(&self) -> Vec<Account> {
        self.state.read().await.accounts.values().cloned().collect()
    }

    pub async fn all_entries(&self) -> Vec<LedgerEntry> {
        self.state.read().await.entries.clone()
    }
}
