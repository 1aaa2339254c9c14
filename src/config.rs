//! Startup configuration
//!
//! All knobs come from environment variables, read once at startup. The
//! lookup is injectable so tests never touch the process environment.

use crate::types::{CostwatchError, Result};

/// Cost Explorer only answers in us-east-1; overridable for testing stacks
pub const DEFAULT_REGION: &str = "us-east-1";

pub const WEBHOOK_URL_VAR: &str = "COSTWATCH_WEBHOOK_URL";
const REGION_VAR: &str = "COSTWATCH_REGION";
const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub webhook_url: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            region: lookup(REGION_VAR)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key_id: lookup(ACCESS_KEY_VAR).filter(|v| !v.is_empty()),
            secret_access_key: lookup(SECRET_KEY_VAR).filter(|v| !v.is_empty()),
            webhook_url: lookup(WEBHOOK_URL_VAR).filter(|v| !v.is_empty()),
        }
    }

    /// Webhook URL, required for delivery runs.
    pub fn webhook_url(&self) -> Result<&str> {
        self.webhook_url
            .as_deref()
            .ok_or_else(|| CostwatchError::Config(format!("{WEBHOOK_URL_VAR} is not set")))
    }

    /// Static credentials when both keys are set; otherwise the SDK default
    /// chain applies.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (
            self.access_key_id.as_deref(),
            self.secret_access_key.as_deref(),
        ) {
            (Some(key), Some(secret)) => Some((key, secret)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]);

        assert_eq!(config.region, "us-east-1");
        assert!(config.access_key_id.is_none());
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_region_override() {
        let config = config_from(&[("COSTWATCH_REGION", "eu-west-1")]);
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_empty_values_treated_as_unset() {
        let config = config_from(&[("COSTWATCH_REGION", ""), ("COSTWATCH_WEBHOOK_URL", "")]);

        assert_eq!(config.region, "us-east-1");
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_webhook_url_required() {
        let config = config_from(&[]);
        let err = config.webhook_url().unwrap_err();

        assert!(matches!(err, CostwatchError::Config(_)));
        assert!(err.to_string().contains("COSTWATCH_WEBHOOK_URL"));
    }

    #[test]
    fn test_webhook_url_present() {
        let config = config_from(&[("COSTWATCH_WEBHOOK_URL", "https://chat.example.com/hooks/abc")]);
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://chat.example.com/hooks/abc"
        );
    }

    #[test]
    fn test_static_credentials_need_both_keys() {
        let only_key = config_from(&[("AWS_ACCESS_KEY_ID", "AKIA123")]);
        assert!(only_key.static_credentials().is_none());

        let both = config_from(&[
            ("AWS_ACCESS_KEY_ID", "AKIA123"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]);
        assert_eq!(both.static_credentials(), Some(("AKIA123", "secret")));
    }
}
