//! Dispatch CRM configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Dispatch CRM connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct CrmConfig {
    /// Base URL; endpoint paths such as `/v2/create_task` are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `X-API-Key` on every request
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size used when listing tasks
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl CrmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key, or an empty string when none is configured.
    pub fn api_key_or_empty(&self) -> String {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().clone())
            .unwrap_or_default()
    }

    /// The key may be omitted outside production, where the CRM will answer
    /// 401 and every read falls back to local storage.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let url = self.base_url.trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidCrmUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.page_limit == 0 || self.page_limit > 500 {
            return Err(ValidationError::InvalidPageLimit);
        }

        if *environment == Environment::Production {
            if !url.starts_with("https://") {
                return Err(ValidationError::CrmMustBeHttps);
            }
            let has_key = self
                .api_key
                .as_ref()
                .is_some_and(|key| !key.expose_secret().is_empty());
            if !has_key {
                return Err(ValidationError::MissingRequired("ROADSIDE__CRM__API_KEY"));
            }
        }
        Ok(())
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://poorman808dashboard.replit.app".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_dashboard() {
        let config = CrmConfig::default();
        assert_eq!(config.base_url, "https://poorman808dashboard.replit.app");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.api_key_or_empty(), "");
    }

    #[test]
    fn missing_key_is_fine_in_development() {
        assert!(CrmConfig::default().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn production_requires_key() {
        let result = CrmConfig::default().validate(&Environment::Production);
        assert!(matches!(result, Err(ValidationError::MissingRequired(_))));

        let config = CrmConfig {
            api_key: Some(SecretString::new("crm-key".to_string())),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn production_requires_https() {
        let config = CrmConfig {
            base_url: "http://crm.internal".to_string(),
            api_key: Some(SecretString::new("crm-key".to_string())),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::CrmMustBeHttps)
        ));
    }

    #[test]
    fn rejects_non_http_url_and_bad_limits() {
        let config = CrmConfig {
            base_url: "ftp://crm".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidCrmUrl)
        ));

        let config = CrmConfig {
            page_limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidPageLimit)
        ));
    }
}
