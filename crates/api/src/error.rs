use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jualputus_core::error::CoreError;
use jualputus_db::StoreError;
use jualputus_whatsapp::DispatchError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain, store and delivery errors and adds HTTP-specific
/// variants. Every error renders as
/// `{ "success": false, "error": "...", "code": "..." }`, with an extra
/// `fields` map for form validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jualputus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A submission store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A WhatsApp delivery error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidFields(_) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Data pengajuan belum lengkap".to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => match err {
                StoreError::Import(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
                StoreError::Serde(e) => (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    format!("Invalid submissions JSON: {e}"),
                ),
                StoreError::Database(_) | StoreError::Io(_) => {
                    tracing::error!(error = %err, "Submission store error");
                    internal()
                }
            },

            // --- Delivery errors ---
            AppError::Dispatch(err) => match err {
                DispatchError::NotConfigured(e) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_NOT_CONFIGURED",
                    e.to_string(),
                ),
                DispatchError::InvalidSubmission(_) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SUBMISSION",
                    "Invalid submission data".to_string(),
                ),
                DispatchError::TextSend(_) => {
                    (StatusCode::BAD_GATEWAY, "DELIVERY_FAILED", err.to_string())
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let mut body = json!({
            "success": false,
            "error": message,
            "code": code,
        });
        if let AppError::Core(CoreError::InvalidFields(fields)) = &self {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
