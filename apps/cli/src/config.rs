//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads an optional `.env` file first.

use std::env;
use std::fmt;
use std::time::Duration;

use quill_assist::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use quill_assist::AssistConfig;
use quill_core::DEFAULT_CURRENCY_MARKER;
use quill_pdf::{DocumentStyle, PageSize};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Settings shared by every command.
#[derive(Clone)]
pub struct AppConfig {
    /// Gemini API key; only `ask` needs it.
    pub google_api_key: Option<String>,

    pub gemini_model: String,

    pub gemini_api_base: String,

    /// Timeout for one assistant request.
    pub gemini_timeout: Duration,

    /// Label printed in front of amounts.
    pub currency_marker: String,

    pub page_size: PageSize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = lookup("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GEMINI_TIMEOUT_SECS".to_string()))?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("GEMINI_TIMEOUT_SECS".to_string()));
        }

        Ok(AppConfig {
            google_api_key: lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty()),

            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),

            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),

            gemini_timeout: Duration::from_secs(timeout_secs),

            currency_marker: lookup("QUILL_CURRENCY")
                .unwrap_or_else(|| DEFAULT_CURRENCY_MARKER.to_string()),

            page_size: lookup("QUILL_PAGE_SIZE")
                .unwrap_or_else(|| "letter".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("QUILL_PAGE_SIZE".to_string()))?,
        })
    }

    /// Document style for `generate`.
    pub fn document_style(&self) -> DocumentStyle {
        DocumentStyle {
            page_size: self.page_size,
            currency_marker: self.currency_marker.clone(),
            ..DocumentStyle::default()
        }
    }

    /// Assistant settings for `ask`.
    pub fn assist_config(&self) -> Result<AssistConfig, ConfigError> {
        let api_key = self
            .google_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingRequired(API_KEY_VAR.to_string()))?;

        Ok(AssistConfig::new(api_key)
            .with_model(self.gemini_model.clone())
            .with_base_url(self.gemini_api_base.clone())
            .with_timeout(self.gemini_timeout))
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("gemini_timeout", &self.gemini_timeout)
            .field("currency_marker", &self.currency_marker)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
