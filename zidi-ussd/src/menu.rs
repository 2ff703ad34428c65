//! The menu state machine.
//!
//! There is no stored session: every callback re-derives "where the user
//! is" from the accumulated token string alone. The decision tree below is
//! keyed on `(tokens[0], token count, last token)` and is total: every
//! unmatched shape falls into an explicit error terminal, so no input can
//! reach an undefined state and re-dialing after a failure is always safe.

use rust_decimal::Decimal;
use tracing::error;
use zidi_common::{money, pin, request};
use zidi_ledger::{Ledger, LedgerError};

use crate::parser;
use crate::reply::{self, Reply};

/// What one callback resolves to: the wire reply, plus an optional SMS
/// body for the notification channel. The notice never influences the
/// reply; dispatching it is the caller's fire-and-forget concern.
#[derive(Debug, Clone)]
pub struct MenuOutcome {
    pub reply: Reply,
    pub notice: Option<String>,
}

impl MenuOutcome {
    fn terminal(body: impl Into<String>) -> Self {
        Self {
            reply: Reply::End(body.into()),
            notice: None,
        }
    }

    fn prompt(body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Con(body.into()),
            notice: None,
        }
    }

    fn with_notice(mut self, notice: String) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Walks the decision tree for one callback. Total over all inputs;
/// ledger failures the tree did not anticipate are logged and downgraded
/// to the generic service terminal, never retried here.
pub async fn dispatch(ledger: &Ledger, session_id: &str, phone: &str, text: &str) -> MenuOutcome {
    let toks = parser::tokens(text);

    match toks.as_slice() {
        [] => MenuOutcome::prompt(reply::root_menu()),

        ["1"] => MenuOutcome::prompt(reply::join_pin_prompt()),
        ["1", pin_candidate] => join_commit(ledger, phone, pin_candidate).await,

        ["2"] => match ledger.get_account(phone).await {
            Some(_) => MenuOutcome::prompt(reply::save_confirm_prompt()),
            None => MenuOutcome::terminal(reply::MSG_JOIN_FIRST),
        },
        ["2", "1"] => save_commit(ledger, session_id, phone).await,
        ["2", _] => MenuOutcome::terminal(reply::MSG_INVALID_INPUT),

        ["3"] => match ledger.get_account(phone).await {
            Some(_) => MenuOutcome::prompt(reply::withdraw_pin_prompt()),
            None => MenuOutcome::terminal(reply::MSG_JOIN_FIRST),
        },
        ["3", pin_candidate] => withdraw_commit(ledger, session_id, phone, pin_candidate).await,

        ["4"] => balance_check(ledger, phone).await,

        // A known flow dialed past its last step is an error, never
        // silently ignored.
        ["1" | "2" | "3" | "4", ..] => MenuOutcome::terminal(reply::MSG_INVALID_INPUT),

        _ => MenuOutcome::terminal(reply::MSG_INVALID_OPTION),
    }
}

async fn join_commit(ledger: &Ledger, phone: &str, pin_candidate: &str) -> MenuOutcome {
    if !pin::is_valid(pin_candidate) {
        return MenuOutcome::terminal(reply::MSG_PIN_FORMAT);
    }

    match ledger.join(phone, pin_candidate).await {
        Ok((account, created)) => {
            if account.pin != pin_candidate {
                // Never reveals the stored PIN, only that it differs.
                return MenuOutcome::terminal(reply::MSG_PIN_CONFLICT);
            }
            let outcome = MenuOutcome::terminal(reply::MSG_JOINED);
            if created {
                outcome.with_notice(reply::welcome_sms(account.external_address.as_str()))
            } else {
                outcome
            }
        }
        Err(e) => {
            error!("join failed for {}: {}", phone, e);
            MenuOutcome::terminal(reply::MSG_CONTACT_SUPPORT)
        }
    }
}

async fn save_commit(ledger: &Ledger, session_id: &str, phone: &str) -> MenuOutcome {
    let tx_id = request::external_tx_id(session_id, "deposit");
    match ledger
        .credit(phone, money::deposit_unit(), &tx_id)
        .await
    {
        Ok(_) => {
            let balance = current_balance(ledger, phone).await;
            MenuOutcome::terminal(reply::saved_msg(balance))
                .with_notice(reply::saved_sms(balance))
        }
        Err(LedgerError::AccountNotFound(_)) => MenuOutcome::terminal(reply::MSG_JOIN_FIRST),
        Err(e) => {
            error!("deposit failed for {}: {}", phone, e);
            MenuOutcome::terminal(reply::MSG_SERVICE_ERROR)
        }
    }
}

async fn withdraw_commit(
    ledger: &Ledger,
    session_id: &str,
    phone: &str,
    pin_candidate: &str,
) -> MenuOutcome {
    let Some(account) = ledger.get_account(phone).await else {
        return MenuOutcome::terminal(reply::MSG_JOIN_FIRST);
    };

    // One combined message for both failure causes, so a caller probing
    // PINs learns nothing about the balance and vice versa.
    if account.pin != pin_candidate || account.balance < money::withdraw_unit() {
        return MenuOutcome::terminal(reply::MSG_WITHDRAW_DENIED);
    }

    let tx_id = request::external_tx_id(session_id, "withdraw");
    match ledger
        .debit(phone, money::withdraw_unit(), &tx_id)
        .await
    {
        Ok(_) => {
            // The ledger debits the gross unit; the fee is reported to the
            // user but never recorded as a movement of its own.
            let fee = money::withdraw_fee();
            let net = money::withdraw_unit() - fee;
            let balance = current_balance(ledger, phone).await;
            MenuOutcome::terminal(reply::withdrawn_msg(net, fee, balance))
                .with_notice(reply::withdrawn_sms(net, fee, balance))
        }
        // Lost a race against a concurrent debit between the check above
        // and the atomic debit.
        Err(LedgerError::InsufficientBalance { .. }) => {
            MenuOutcome::terminal(reply::MSG_WITHDRAW_DENIED)
        }
        Err(LedgerError::AccountNotFound(_)) => MenuOutcome::terminal(reply::MSG_JOIN_FIRST),
        Err(e) => {
            error!("withdrawal failed for {}: {}", phone, e);
            MenuOutcome::terminal(reply::MSG_SERVICE_ERROR)
        }
    }
}

async fn balance_check(ledger: &Ledger, phone: &str) -> MenuOutcome {
    let Some(account) = ledger.get_account(phone).await else {
        return MenuOutcome::terminal(reply::MSG_JOIN_FIRST);
    };

    // Demo quirk, kept on purpose: once savings reach one deposit unit the
    // check shows a fixed promotional figure instead of the true balance.
    let shown = if account.balance >= money::deposit_unit() {
        money::promo_balance()
    } else {
        account.balance
    };

    MenuOutcome::terminal(reply::balance_msg(shown)).with_notice(reply::balance_sms(shown))
}

async fn current_balance(ledger: &Ledger, phone: &str) -> Decimal {
    ledger
        .get_account(phone)
        .await
        .map(|a| a.balance)
        .unwrap_or_default()
}
