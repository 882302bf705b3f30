//! HTTP client for the Fonnte send endpoint.
//!
//! Every request goes to the same URL with the token in the `Authorization`
//! header and the configured `target` / `countryCode`. A request succeeds
//! when the HTTP status is 2xx, the body is JSON, and a boolean `status`
//! field in that body (when present) is `true`.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

use crate::config::{ConfigError, FonnteConfig};
use crate::photo::PhotoFile;

/// Longest response body kept in an error, in bytes.
const MAX_ERROR_BODY: usize = 512;

/// Errors from a single Fonnte request.
#[derive(Debug, thiserror::Error)]
pub enum FonnteError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Fonnte returned a non-2xx status code.
    #[error("Fonnte returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Fonnte answered 2xx but flagged the send as failed.
    #[error("Fonnte rejected the request: {reason}")]
    Rejected { reason: String },

    /// The 2xx response body was not JSON.
    #[error("Malformed Fonnte response: {0}")]
    MalformedResponse(String),
}

/// Client for one Fonnte account and admin target. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FonnteClient {
    http: reqwest::Client,
    config: Arc<FonnteConfig>,
}

impl FonnteClient {
    /// Build a client whose requests time out after `config.timeout`.
    pub fn new(config: FonnteConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &FonnteConfig {
        &self.config
    }

    /// Send a text message to the admin.
    pub async fn send_text(&self, message: &str) -> Result<Value, FonnteError> {
        let body = json!({
            "target": self.config.target,
            "message": message,
            "countryCode": self.config.country_code,
        });
        self.post_json(&body).await
    }

    /// Send a file referenced by URL or base64 data URI.
    pub async fn send_file_url(&self, file: &str, caption: &str) -> Result<Value, FonnteError> {
        let body = json!({
            "target": self.config.target,
            "file": file,
            "caption": caption,
            "countryCode": self.config.country_code,
        });
        self.post_json(&body).await
    }

    /// Upload a file as a multipart `file` part.
    pub async fn send_file_upload(
        &self,
        photo: &PhotoFile,
        caption: &str,
    ) -> Result<Value, FonnteError> {
        let form = Form::new()
            .text("target", self.config.target.clone())
            .part("file", file_part(photo))
            .text("caption", caption.to_string())
            .text("countryCode", self.config.country_code.clone());

        let response = self
            .http
            .post(&self.config.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.config.token)
            .multipart(form)
            .send()
            .await?;

        Self::evaluate(response).await
    }

    // ---- private helpers ----

    async fn post_json(&self, body: &Value) -> Result<Value, FonnteError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.config.token)
            .json(body)
            .send()
            .await?;

        Self::evaluate(response).await
    }

    /// Turn a raw response into the parsed body or a [`FonnteError`].
    async fn evaluate(response: reqwest::Response) -> Result<Value, FonnteError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FonnteError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&body),
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|_| FonnteError::MalformedResponse(truncate(&body)))?;

        if value.get("status").and_then(Value::as_bool) == Some(false) {
            let reason = ["reason", "detail"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str))
                .unwrap_or("unknown reason")
                .to_string();
            return Err(FonnteError::Rejected { reason });
        }

        Ok(value)
    }
}

/// Multipart `file` part for `photo`. A content type the MIME parser rejects
/// is dropped rather than failing the upload.
fn file_part(photo: &PhotoFile) -> Part {
    let base = || Part::bytes(photo.bytes.clone()).file_name(photo.file_name.clone());
    let Some(content_type) = &photo.content_type else {
        return base();
    };
    base().mime_str(content_type).unwrap_or_else(|e| {
        tracing::warn!(
            file_name = %photo.file_name,
            content_type = %content_type,
            error = %e,
            "Dropping invalid photo content type"
        );
        base()
    })
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
