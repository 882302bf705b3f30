//! Fonnte gateway configuration.
//!
//! The token and admin number are secrets of the server process. They are
//! read from the environment and never leave this crate except in the
//! `Authorization` header of outbound requests.

use std::fmt;
use std::time::Duration;

/// Default Fonnte send endpoint.
pub const DEFAULT_API_URL: &str = "https://api.fonnte.com/send";

/// Default country code sent with every request (Indonesia).
pub const DEFAULT_COUNTRY_CODE: &str = "62";

/// Default timeout for a single outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Error raised when delivery cannot be configured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("WhatsApp service not configured: FONNTE_TOKEN is not set")]
    MissingToken,

    #[error("Admin WhatsApp not configured: ADMIN_WA is not set")]
    MissingTarget,

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for talking to the Fonnte API.
#[derive(Clone)]
pub struct FonnteConfig {
    /// Send endpoint URL.
    pub api_url: String,
    /// API token, sent verbatim as the `Authorization` header.
    pub token: String,
    /// Admin WhatsApp number every message goes to.
    pub target: String,
    /// Country code parameter (`countryCode`).
    pub country_code: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause between consecutive photo sends.
    pub photo_delay: Duration,
}

impl FonnteConfig {
    /// Config with default endpoint, country code, timeout and no photo delay.
    pub fn new(token: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            target: target.into(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            photo_delay: Duration::ZERO,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable                | Required | Default                        |
    /// |-------------------------|----------|--------------------------------|
    /// | `FONNTE_TOKEN`          | yes      | `VITE_FONNTE_TOKEN`            |
    /// | `ADMIN_WA`              | yes      | `VITE_ADMIN_WA`                |
    /// | `FONNTE_API_URL`        | no       | `https://api.fonnte.com/send`  |
    /// | `FONNTE_COUNTRY_CODE`   | no       | `62`                           |
    /// | `FONNTE_TIMEOUT_SECS`   | no       | `20`                           |
    /// | `FONNTE_PHOTO_DELAY_MS` | no       | `0`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FonnteConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |primary: &str, legacy: &str| {
            lookup(primary)
                .or_else(|| lookup(legacy))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = var("FONNTE_TOKEN", "VITE_FONNTE_TOKEN").ok_or(ConfigError::MissingToken)?;
        let target = var("ADMIN_WA", "VITE_ADMIN_WA").ok_or(ConfigError::MissingTarget)?;

        let mut config = Self::new(token, target);
        if let Some(url) = lookup("FONNTE_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(code) = lookup("FONNTE_COUNTRY_CODE").filter(|v| !v.trim().is_empty()) {
            config.country_code = code.trim().to_string();
        }
        if let Some(secs) = parse_u64(&lookup, "FONNTE_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_u64(&lookup, "FONNTE_PHOTO_DELAY_MS")? {
            config.photo_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

impl fmt::Debug for FonnteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FonnteConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("target", &self.target)
            .field("country_code", &self.country_code)
            .field("timeout", &self.timeout)
            .field("photo_delay", &self.photo_delay)
            .finish()
    }
}
