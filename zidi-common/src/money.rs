//! Product money constants and formatting.
//!
//! All amounts are cUSD with two fractional digits. The units are fixed by
//! product rules: one deposit saves $1.00, one withdrawal pays out $10.00.

use rust_decimal::Decimal;

/// Amount credited per confirmed deposit.
pub fn deposit_unit() -> Decimal {
    Decimal::new(100, 2)
}

/// Gross amount debited per withdrawal.
pub fn withdraw_unit() -> Decimal {
    Decimal::new(1000, 2)
}

/// Flat withdrawal fee. Informational only: the ledger debits the gross
/// unit and the fee never becomes a ledger movement of its own.
pub fn withdraw_fee() -> Decimal {
    Decimal::new(50, 2)
}

/// Fixed figure shown on balance checks once savings reach one deposit
/// unit. Demo behavior carried over from the pilot build; the true balance
/// is not disclosed past that threshold.
pub fn promo_balance() -> Decimal {
    Decimal::new(105, 2)
}

/// Renders an amount as `$X.XX`.
pub fn fmt_usd(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
