//! Handlers that deliver submissions to the admin's WhatsApp.
//!
//! Two transports exist because the web client has two ways of holding
//! photos: `POST /api/v1/submissions/send` receives the raw form plus
//! uploaded files, while `POST /send` receives an already assembled record
//! with photos as URLs or base64 data URIs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use jualputus_core::error::CoreError;
use jualputus_core::submission::{assemble, NewSubmission, Submission};
use jualputus_core::validation::{collect_field_errors, validate_photo_count};
use jualputus_whatsapp::{DispatchError, DispatchSummary, PhotoFile};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart part carrying the form as JSON.
const SUBMISSION_PART: &str = "submission";
/// Multipart part(s) carrying photo files.
const PHOTO_PART: &str = "photos";
const DEFAULT_PHOTO_NAME: &str = "photo.jpg";

/// Success body shared by both delivery endpoints.
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub success: bool,
    pub message: &'static str,
    /// Present when the record was stored by this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub summary: DispatchSummary,
}

impl DeliveryResponse {
    fn new(id: Option<String>, summary: DispatchSummary) -> Self {
        Self {
            success: true,
            message: "Submission sent successfully to admin WhatsApp",
            id,
            summary,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/v1/submissions/send
// ---------------------------------------------------------------------------

/// Assemble, validate, store and deliver a submission with uploaded photos.
///
/// The record is stored before delivery starts, so a failed text send still
/// leaves it in the list for manual follow-up.
pub async fn submit_and_send(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let whatsapp = state.whatsapp()?;

    let mut form: Option<NewSubmission> = None;
    let mut photos: Vec<PhotoFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            SUBMISSION_PART => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let parsed = serde_json::from_str(&text).map_err(|e| {
                    AppError::BadRequest(format!("Invalid submission JSON: {e}"))
                })?;
                form = Some(parsed);
            }
            PHOTO_PART => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_PHOTO_NAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                photos.push(PhotoFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let form = form.ok_or_else(|| {
        AppError::BadRequest(format!("Missing '{SUBMISSION_PART}' part"))
    })?;

    let mut errors = collect_field_errors(&form);
    if let Err(CoreError::InvalidFields(photo_errors)) = validate_photo_count(photos.len()) {
        errors.extend(photo_errors);
    }
    if !errors.is_empty() {
        return Err(CoreError::InvalidFields(errors).into());
    }

    let submission = assemble(form, &state.tickets, chrono::Utc::now());
    state.store.save(&submission).await?;
    tracing::info!(
        id = %submission.id,
        ticket = %submission.ticket_number,
        photos = photos.len(),
        "Submission stored, delivering"
    );

    let report = whatsapp.uploads.dispatch(&submission, &photos).await?;

    Ok((
        StatusCode::CREATED,
        Json(DeliveryResponse::new(Some(submission.id), report.summary())),
    ))
}

// ---------------------------------------------------------------------------
// POST /send
// ---------------------------------------------------------------------------

/// An assembled record plus its photos as URLs or data URIs.
#[derive(Debug, Deserialize)]
pub struct AssembledSubmission {
    #[serde(flatten)]
    pub submission: Submission,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Deliver an already assembled submission. Nothing is stored.
pub async fn send_assembled(
    State(state): State<AppState>,
    payload: Result<Json<AssembledSubmission>, JsonRejection>,
) -> AppResult<Json<DeliveryResponse>> {
    let whatsapp = state.whatsapp()?;

    let Json(AssembledSubmission { submission, photos }) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "Rejected malformed submission payload");
        DispatchError::InvalidSubmission(e.body_text())
    })?;

    let report = whatsapp.links.dispatch(&submission, &photos).await?;
    Ok(Json(DeliveryResponse::new(None, report.summary())))
}
