//! Handlers for the `/submissions` resource.
//!
//! Intake (assemble + store without delivery) is public. Record queries,
//! status updates and whole-collection export / import require
//! [`AdminAuth`].

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use jualputus_core::error::CoreError;
use jualputus_core::submission::{assemble, validate_status, NewSubmission, Submission};
use jualputus_core::validation::validate_new_submission;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AdminAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Identity of a newly stored submission.
#[derive(Debug, Serialize)]
pub struct CreatedSubmission {
    pub id: String,
    pub ticket_number: String,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

/// Result of an import.
#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
}

fn not_found(key: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Submission",
        key: key.to_string(),
    }
}

// ---------------------------------------------------------------------------
// POST /api/v1/submissions
// ---------------------------------------------------------------------------

/// Validate the form, assemble the record and store it. Nothing is sent.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(input): Json<NewSubmission>,
) -> AppResult<impl IntoResponse> {
    validate_new_submission(&input)?;

    let submission = assemble(input, &state.tickets, chrono::Utc::now());
    state.store.save(&submission).await?;

    tracing::info!(
        id = %submission.id,
        ticket = %submission.ticket_number,
        "Submission stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedSubmission {
                id: submission.id,
                ticket_number: submission.ticket_number,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GET /api/v1/submissions -- newest first.
pub async fn list_submissions(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> AppResult<Json<DataResponse<Vec<Submission>>>> {
    let data = state.store.list_all().await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/submissions/{id}
pub async fn get_submission(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Submission>>> {
    let data = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/submissions/ticket/{ticket}
pub async fn get_by_ticket(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(ticket): Path<String>,
) -> AppResult<Json<DataResponse<Submission>>> {
    let data = state
        .store
        .find_by_ticket(&ticket)
        .await?
        .ok_or_else(|| not_found(&ticket))?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// PUT /api/v1/submissions/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatus>,
) -> AppResult<Json<DataResponse<Submission>>> {
    validate_status(&body.status)?;

    let data = state
        .store
        .update_status(&id, &body.status)
        .await?
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(id = %id, status = %body.status, "Submission status updated");
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/submissions/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if state.store.delete(&id).await? {
        tracing::info!(id = %id, "Submission deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id).into())
    }
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

/// GET /api/v1/submissions/export -- bare pretty-printed JSON array.
pub async fn export_submissions(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> AppResult<impl IntoResponse> {
    let json = jualputus_db::export_json(state.store.as_ref()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"submissions.json\"",
            ),
        ],
        json,
    ))
}

/// POST /api/v1/submissions/import -- replaces every stored record.
pub async fn import_submissions(
    State(state): State<AppState>,
    _admin: AdminAuth,
    body: String,
) -> AppResult<Json<DataResponse<ImportResult>>> {
    let imported = jualputus_db::import_json(state.store.as_ref(), &body).await?;
    tracing::info!(imported, "Submissions imported");
    Ok(Json(DataResponse {
        data: ImportResult { imported },
    }))
}
