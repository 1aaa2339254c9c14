//! Webhook delivery
//!
//! Posts the rendered report to a Mattermost-style incoming webhook. Delivery
//! is one-shot: a failure surfaces to the operator, re-triggering is left to
//! the scheduler.

use crate::types::{CostwatchError, Result};
use serde::Serialize;
use std::time::Duration;

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Bot identity shown next to the posted message
const BOT_USERNAME: &str = "AWS Billing Bot";
const BOT_ICON_EMOJI: &str = ":money_with_wings:";

/// Incoming-webhook payload
#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    pub text: String,
    pub username: &'static str,
    pub icon_emoji: &'static str,
}

/// Build the payload for a rendered report.
pub fn build_payload(text: &str) -> WebhookPayload {
    WebhookPayload {
        text: text.to_string(),
        username: BOT_USERNAME,
        icon_emoji: BOT_ICON_EMOJI,
    }
}

/// Posts messages to a single incoming-webhook URL.
pub struct WebhookNotifier {
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Deliver `text` to the webhook. Non-2xx responses are errors.
    pub fn send(&self, text: &str) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CostwatchError::Webhook(format!("HTTP client error: {}", e)))?;

        let response = client
            .post(&self.url)
            .json(&build_payload(text))
            .send()
            .map_err(|e| CostwatchError::Webhook(format!("HTTP request failed: {}", e)))?;

        response
            .error_for_status()
            .map_err(|e| CostwatchError::Webhook(format!("webhook rejected message: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_bot_identity() {
        let payload = build_payload("hello");

        assert_eq!(payload.text, "hello");
        assert_eq!(payload.username, "AWS Billing Bot");
        assert_eq!(payload.icon_emoji, ":money_with_wings:");
    }

    #[test]
    fn test_payload_serializes_expected_fields() {
        let payload = build_payload("## 📊 AWS Cost Summary");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["text"], "## 📊 AWS Cost Summary");
        assert_eq!(json["username"], "AWS Billing Bot");
        assert_eq!(json["icon_emoji"], ":money_with_wings:");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_send_to_invalid_url_is_webhook_error() {
        let notifier = WebhookNotifier::new("not-a-url");
        let err = notifier.send("ping").unwrap_err();

        assert!(matches!(err, CostwatchError::Webhook(_)));
    }
}
