use std::fmt;
use std::path::PathBuf;

use jualputus_core::message::DEFAULT_UTC_OFFSET_HOURS;
use jualputus_core::ticket::DEFAULT_TICKET_PREFIX;

/// A server setting that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{var} has an invalid value: '{value}'")]
pub struct ServerConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Shared secret for the admin endpoints. `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Compare against a presented token without short-circuiting on the
    /// first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(<redacted>)")
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// WhatsApp delivery settings live in
/// [`jualputus_whatsapp::FonnteConfig`] and are loaded separately.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`, photo uploads are slow).
    pub request_timeout_secs: u64,
    /// Largest accepted request body (default: 20 MiB).
    pub max_upload_bytes: usize,
    /// Postgres connection string. When unset, submissions are kept in memory.
    pub database_url: Option<String>,
    /// JSON snapshot file for the in-memory store.
    pub submissions_file: Option<PathBuf>,
    /// Ticket number prefix (default: `JP`).
    pub ticket_prefix: String,
    /// Offset used for the timestamp in admin messages (default: `+7`).
    pub message_utc_offset_hours: i32,
    /// Bearer token for the admin endpoints. When unset they always answer 401.
    pub admin_api_token: Option<AdminToken>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 60,
            max_upload_bytes: 20 * 1024 * 1024,
            database_url: None,
            submissions_file: None,
            ticket_prefix: DEFAULT_TICKET_PREFIX.into(),
            message_utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            admin_api_token: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `60`                    |
    /// | `MAX_UPLOAD_BYTES`         | `20971520`              |
    /// | `DATABASE_URL`             | unset (memory store)    |
    /// | `SUBMISSIONS_FILE`         | unset (no snapshot)     |
    /// | `TICKET_PREFIX`            | `JP`                    |
    /// | `MESSAGE_UTC_OFFSET_HOURS` | `7`                     |
    /// | `ADMIN_API_TOKEN`          | unset (admin API off)   |
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let defaults = Self::default();
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cors_origins = match non_empty("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            database_url: non_empty("DATABASE_URL"),
            submissions_file: non_empty("SUBMISSIONS_FILE").map(PathBuf::from),
            ticket_prefix: non_empty("TICKET_PREFIX").unwrap_or(defaults.ticket_prefix),
            message_utc_offset_hours: parse_var(
                &lookup,
                "MESSAGE_UTC_OFFSET_HOURS",
                defaults.message_utc_offset_hours,
            )?,
            admin_api_token: non_empty("ADMIN_API_TOKEN").map(AdminToken::new),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ServerConfigError> {
    match lookup(var).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|_| ServerConfigError { var, value: v }),
    }
}
