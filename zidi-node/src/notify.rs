//! Outbound SMS notifications.
//!
//! Strictly best-effort: the USSD reply is already formatted before any
//! notice is dispatched, and a failed or slow send can neither change nor
//! delay it. Failures are logged and swallowed.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SmsConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected message: {0}")]
    Rejected(String),
}

/// A best-effort "send text to phone number" collaborator.
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// Name of the channel for logging.
    fn name(&self) -> &str;

    async fn send(&self, to: &str, body: &str) -> Result<(), NotifyError>;
}

/// Africa's Talking messaging API client.
pub struct AfricasTalkingSms {
    http: reqwest::Client,
    config: SmsConfig,
}

impl AfricasTalkingSms {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SmsNotifier for AfricasTalkingSms {
    fn name(&self) -> &str {
        "africastalking"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        let mut form = vec![
            ("username", self.config.username.as_str()),
            ("to", to),
            ("message", body),
        ];
        if let Some(sender) = &self.config.sender {
            form.push(("from", sender.as_str()));
        }

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("apiKey", self.config.api_key.as_deref().unwrap_or_default())
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(format!("status {}", status)));
        }
        Ok(())
    }
}

/// Fallback when no gateway credentials are configured: messages go to the
/// log instead of a phone.
pub struct LogOnlySms;

#[async_trait]
impl SmsNotifier for LogOnlySms {
    fn name(&self) -> &str {
        "log-only"
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        info!("sms (not delivered) to={}: {}", to, body);
        Ok(())
    }
}

/// Fires a notice in the background. Returns immediately; the send result
/// only ever reaches the log.
pub fn dispatch_notice(notifier: Arc<dyn SmsNotifier>, to: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(&to, &body).await {
            warn!("sms dispatch via {} failed: {}", notifier.name(), e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_only_never_fails() {
        let notifier = LogOnlySms;
        assert!(notifier.send("+254700000001", "hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_notice_returns_before_send_completes() {
        // dispatch_notice must not block the caller even if the notifier
        // is slow.
        struct SlowSms;

        #[async_trait]
        impl SmsNotifier for SlowSms {
            fn name(&self) -> &str {
                "slow"
            }

            async fn send(&self, _to: &str, _body: &str) -> Result<(), NotifyError> {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Ok(())
            }
        }

        let start = std::time::Instant::now();
        dispatch_notice(Arc::new(SlowSms), "+254700000001".into(), "hi".into());
        assert!(start.elapsed() < std::time::Duration::from_millis(100));
    }
}
