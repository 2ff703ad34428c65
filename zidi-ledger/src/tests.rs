use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{EntryKind, Ledger, LedgerError};

fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

async fn assert_invariant(ledger: &Ledger, phone: &str) {
    let account = ledger.get_account(phone).await.expect("account exists");
    let sum: Decimal = ledger
        .entries_for(phone)
        .await
        .iter()
        .map(|e| e.signed_amount())
        .sum();
    assert_eq!(account.balance, sum, "balance must equal entry sum");
    assert!(account.balance >= Decimal::ZERO);
}

#[tokio::test]
async fn test_join_creates_account_with_zero_balance() {
    let ledger = Ledger::new();
    let (account, created) = ledger.join("+254700000001", "1234").await.unwrap();

    assert!(created);
    assert_eq!(account.phone, "+254700000001");
    assert_eq!(account.pin, "1234");
    assert_eq!(account.balance, Decimal::ZERO);
    assert!(account.external_address.starts_with("0x"));
}

#[tokio::test]
async fn test_join_is_idempotent() {
    let ledger = Ledger::new();
    let (first, _) = ledger.join("+254700000001", "1234").await.unwrap();
    let (second, created) = ledger.join("+254700000001", "9999").await.unwrap();

    assert!(!created);
    // Existing account comes back untouched: original PIN and address.
    assert_eq!(second.pin, "1234");
    assert_eq!(second.external_address, first.external_address);
    assert_eq!(ledger.all_accounts().await.len(), 1);
}

#[tokio::test]
async fn test_credit_appends_entry_and_moves_balance() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();

    let entry = ledger
        .credit("+254700000001", usd(100), "0xdeposit1")
        .await
        .unwrap();

    assert_eq!(entry.kind, EntryKind::Deposit);
    assert_eq!(entry.amount, usd(100));
    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, usd(100));
    assert_invariant(&ledger, "+254700000001").await;
}

#[tokio::test]
async fn test_credit_duplicate_tx_id_is_noop() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();

    let first = ledger
        .credit("+254700000001", usd(100), "0xdeposit1")
        .await
        .unwrap();
    let replay = ledger
        .credit("+254700000001", usd(100), "0xdeposit1")
        .await
        .unwrap();

    assert_eq!(replay.entry_id, first.entry_id);
    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, usd(100), "replay must not double-apply");
    assert_eq!(ledger.entries_for("+254700000001").await.len(), 1);
}

#[tokio::test]
async fn test_debit_duplicate_tx_id_is_noop() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();
    ledger
        .credit("+254700000001", usd(2000), "0xdeposit1")
        .await
        .unwrap();

    ledger
        .debit("+254700000001", usd(1000), "0xwithdraw1")
        .await
        .unwrap();
    ledger
        .debit("+254700000001", usd(1000), "0xwithdraw1")
        .await
        .unwrap();

    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, usd(1000));
    assert_invariant(&ledger, "+254700000001").await;
}

#[tokio::test]
async fn test_debit_rejects_overdraw_without_entry() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();
    ledger
        .credit("+254700000001", usd(500), "0xdeposit1")
        .await
        .unwrap();

    let err = ledger
        .debit("+254700000001", usd(1000), "0xwithdraw1")
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, usd(500), "failed debit must not move funds");
    assert_eq!(ledger.entries_for("+254700000001").await.len(), 1);
}

#[tokio::test]
async fn test_operations_on_unknown_account_fail() {
    let ledger = Ledger::new();
    let err = ledger
        .credit("+254700000009", usd(100), "0xdeposit1")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(_)));
}

#[tokio::test]
async fn test_zero_and_negative_amounts_rejected() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();

    let err = ledger
        .credit("+254700000001", Decimal::ZERO, "0xdeposit1")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));

    let err = ledger
        .debit("+254700000001", usd(-100), "0xwithdraw1")
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
}

#[tokio::test]
async fn test_concurrent_joins_resolve_to_one_account() {
    let ledger = Arc::new(Ledger::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let ledger = Arc::clone(&ledger);
        let pin = format!("{:04}", i);
        handles.push(tokio::spawn(async move {
            ledger.join("+254700000001", &pin).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        let (_, created) = handle.await.unwrap().unwrap();
        if created {
            winners += 1;
        }
    }

    assert_eq!(winners, 1, "exactly one join may create the account");
    assert_eq!(ledger.all_accounts().await.len(), 1);
}

#[tokio::test]
async fn test_concurrent_debits_cannot_overdraw() {
    let ledger = Arc::new(Ledger::new());
    ledger.join("+254700000001", "1234").await.unwrap();
    ledger
        .credit("+254700000001", usd(3000), "0xseed")
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..5 {
        let ledger = Arc::clone(&ledger);
        let tx_id = format!("0xwithdraw{}", i);
        handles.push(tokio::spawn(async move {
            ledger.debit("+254700000001", usd(1000), &tx_id).await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    // $30 only covers three $10 debits; the rest must fail cleanly.
    assert_eq!(succeeded, 3);
    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, Decimal::ZERO);
    assert_invariant(&ledger, "+254700000001").await;
}

#[tokio::test]
async fn test_invariant_across_mixed_history() {
    let ledger = Ledger::new();
    ledger.join("+254700000001", "1234").await.unwrap();

    for i in 0..12 {
        ledger
            .credit("+254700000001", usd(100), &format!("0xdep{}", i))
            .await
            .unwrap();
    }
    ledger
        .debit("+254700000001", usd(1000), "0xwd0")
        .await
        .unwrap();

    let account = ledger.get_account("+254700000001").await.unwrap();
    assert_eq!(account.balance, usd(200));
    assert_invariant(&ledger, "+254700000001").await;
}
