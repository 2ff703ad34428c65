//! SMS gateway configuration.
//!
//! Credentials and sender identity are read from the environment exactly
//! once at startup and carried in this struct; nothing down the pipeline
//! does ambient lookups.

const DEFAULT_ENDPOINT: &str = "https://api.sandbox.africastalking.com/version1/messaging";

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub endpoint: String,
    pub username: String,
    pub api_key: Option<String>,
    /// Sender id / short code, if provisioned.
    pub sender: Option<String>,
}

impl SmsConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("ZIDI_SMS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            username: std::env::var("ZIDI_SMS_USERNAME").unwrap_or_else(|_| "sandbox".to_string()),
            api_key: std::env::var("ZIDI_SMS_API_KEY").ok(),
            sender: std::env::var("ZIDI_SMS_SENDER").ok(),
        }
    }

    /// Without an API key there is nothing to talk to; the node falls back
    /// to the log-only notifier.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
