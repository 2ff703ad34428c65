//! Wire replies and the literal menu texts.

use rust_decimal::Decimal;
use zidi_common::money;

/// A rendered USSD reply. `Con` keeps the session open and the gateway
/// will re-prompt; `End` closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Con(String),
    End(String),
}

impl Reply {
    /// Produces the wire text with the literal `CON ` / `END ` prefix the
    /// gateway expects.
    pub fn render(&self) -> String {
        match self {
            Reply::Con(body) => format!("CON {}", body),
            Reply::End(body) => format!("END {}", body),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Reply::End(_))
    }
}

pub const MSG_PIN_FORMAT: &str = "PIN must be 4 digits";
pub const MSG_JOINED: &str = "Joined ZidiSave successfully";
pub const MSG_PIN_CONFLICT: &str = "Account exists with a different PIN";
pub const MSG_CONTACT_SUPPORT: &str = "Something went wrong, please contact support";
pub const MSG_WITHDRAW_DENIED: &str = "Invalid PIN or insufficient balance";
pub const MSG_JOIN_FIRST: &str = "Please join ZidiSave first (dial option 1)";
pub const MSG_INVALID_OPTION: &str = "Invalid option";
pub const MSG_INVALID_INPUT: &str = "Invalid input";
pub const MSG_SERVICE_ERROR: &str = "Service error, please try again later";

pub fn root_menu() -> String {
    format!(
        "Welcome to ZidiSave\n1. Join\n2. Save {}\n3. Withdraw {}\n4. Check Balance",
        money::fmt_usd(money::deposit_unit()),
        money::fmt_usd(money::withdraw_unit())
    )
}

pub fn join_pin_prompt() -> String {
    "Choose a 4-digit PIN".to_string()
}

pub fn save_confirm_prompt() -> String {
    format!(
        "Save {} to your ZidiSave account?\n1. Confirm",
        money::fmt_usd(money::deposit_unit())
    )
}

pub fn saved_msg(balance: Decimal) -> String {
    format!(
        "Saved {}. New balance: {}",
        money::fmt_usd(money::deposit_unit()),
        money::fmt_usd(balance)
    )
}

pub fn withdraw_pin_prompt() -> String {
    format!(
        "Enter your PIN to withdraw {}",
        money::fmt_usd(money::withdraw_unit())
    )
}

pub fn withdrawn_msg(net: Decimal, fee: Decimal, balance: Decimal) -> String {
    format!(
        "Sent {} to your number (fee {}). New balance: {}",
        money::fmt_usd(net),
        money::fmt_usd(fee),
        money::fmt_usd(balance)
    )
}

pub fn balance_msg(shown: Decimal) -> String {
    format!("Your ZidiSave balance is {}", money::fmt_usd(shown))
}

// SMS bodies for the notification channel.

pub fn welcome_sms(address: &str) -> String {
    format!(
        "Welcome to ZidiSave! Your savings address is {}.",
        address
    )
}

pub fn saved_sms(balance: Decimal) -> String {
    format!(
        "ZidiSave: saved {}. New balance: {}.",
        money::fmt_usd(money::deposit_unit()),
        money::fmt_usd(balance)
    )
}

pub fn withdrawn_sms(net: Decimal, fee: Decimal, balance: Decimal) -> String {
    format!(
        "ZidiSave: sent you {} (fee {}). New balance: {}.",
        money::fmt_usd(net),
        money::fmt_usd(fee),
        money::fmt_usd(balance)
    )
}

pub fn balance_sms(shown: Decimal) -> String {
    format!("ZidiSave balance: {}.", money::fmt_usd(shown))
}
