//! `.statematch.toml` configuration.
//!
//! Every section is optional and falls back to the defaults below. Secrets
//! never live in the file; API keys are read from the environment by the
//! adapters that need them.

pub mod loader;

pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

use crate::errors::ConfigError;
use crate::results::{Price, FREE_PREVIEW_COUNT};
use crate::scoring::{ScoringOptions, TieBreak, DEFAULT_RESULT_COUNT};
use crate::services::chat::{DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL};
use crate::services::mailer::DEFAULT_SENDER;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateMatchConfig {
    pub scoring: ScoringSection,
    pub data: DataSection,
    pub session: SessionSection,
    pub checkout: CheckoutSection,
    pub mailer: MailerSection,
    pub chat: ChatSection,
    pub site: SiteSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringSection {
    pub result_count: usize,
    pub free_preview: usize,
    pub tie_break: TieBreak,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            result_count: DEFAULT_RESULT_COUNT,
            free_preview: FREE_PREVIEW_COUNT,
            tie_break: TieBreak::default(),
        }
    }
}

impl ScoringSection {
    pub fn options(&self) -> ScoringOptions {
        ScoringOptions {
            result_count: self.result_count,
            tie_break: self.tie_break,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    /// Directory holding `states.*` and `questions.*`. Bundled data when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckoutSection {
    pub price_cents: u32,
    pub currency: String,
    pub return_origin: String,
}

impl Default for CheckoutSection {
    fn default() -> Self {
        let price = Price::default();
        Self {
            price_cents: price.amount_cents,
            currency: price.currency,
            return_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl CheckoutSection {
    pub fn price(&self) -> Price {
        Price {
            amount_cents: self.price_cents,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailerKind {
    #[default]
    Outbox,
    Resend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MailerSection {
    pub kind: MailerKind,
    pub from: String,
    /// Where the outbox mailer writes; `<session dir>/outbox` when unset.
    pub outbox_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for MailerSection {
    fn default() -> Self {
        Self {
            kind: MailerKind::default(),
            from: DEFAULT_SENDER.to_string(),
            outbox_dir: None,
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl MailerSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatSection {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl ChatSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Public URL used in share text and links.
    pub url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            url: "https://statematchquiz.com".to_string(),
        }
    }
}

impl StateMatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        if scoring.result_count == 0 {
            return Err(ConfigError::Invalid(
                "scoring.result_count must be at least 1".into(),
            ));
        }
        if scoring.free_preview > scoring.result_count {
            return Err(ConfigError::Invalid(format!(
                "scoring.free_preview ({}) cannot exceed scoring.result_count ({})",
                scoring.free_preview, scoring.result_count
            )));
        }

        let checkout = &self.checkout;
        if checkout.currency.len() != 3
            || !checkout.currency.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::Invalid(format!(
                "checkout.currency must be a three-letter ISO code, got '{}'",
                checkout.currency
            )));
        }
        if !is_http_url(&checkout.return_origin) {
            return Err(ConfigError::Invalid(
                "checkout.return_origin must start with http:// or https://".into(),
            ));
        }

        if !self.mailer.from.contains('@') {
            return Err(ConfigError::Invalid(
                "mailer.from must contain an email address".into(),
            ));
        }
        if self.mailer.endpoint.as_deref().is_some_and(|url| !is_http_url(url)) {
            return Err(ConfigError::Invalid(
                "mailer.endpoint must start with http:// or https://".into(),
            ));
        }

        if !is_http_url(&self.chat.endpoint) {
            return Err(ConfigError::Invalid(
                "chat.endpoint must start with http:// or https://".into(),
            ));
        }
        if self.chat.timeout_secs == 0 || self.mailer.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
        }

        if !is_http_url(&self.site.url) {
            return Err(ConfigError::Invalid(
                "site.url must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StateMatchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.scoring.result_count, 5);
        assert_eq!(config.scoring.free_preview, 3);
        assert_eq!(config.checkout.price().to_string(), "$7.00");
    }

    #[test]
    fn preview_cannot_exceed_result_count() {
        let mut config = StateMatchConfig::default();
        config.scoring.free_preview = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn currency_must_be_iso_code() {
        let mut config = StateMatchConfig::default();
        config.checkout.currency = "usd".into();
        assert!(config.validate().is_err());
    }
}
