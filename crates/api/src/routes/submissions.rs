//! Route definitions for the `/submissions` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{send, submissions};
use crate::state::AppState;

/// Routes mounted at `/submissions`. Only `POST /` and `POST /send` are
/// public; the rest need the admin Bearer token.
///
/// ```text
/// GET    /                    -> list_submissions
/// POST   /                    -> create_submission
/// POST   /send                -> submit_and_send (multipart)
/// GET    /export              -> export_submissions
/// POST   /import              -> import_submissions
/// GET    /ticket/{ticket}     -> get_by_ticket
/// GET    /{id}                -> get_submission
/// DELETE /{id}                -> delete_submission
/// PUT    /{id}/status         -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route("/send", post(send::submit_and_send))
        .route("/export", get(submissions::export_submissions))
        .route("/import", post(submissions::import_submissions))
        .route("/ticket/{ticket}", get(submissions::get_by_ticket))
        .route(
            "/{id}",
            get(submissions::get_submission).delete(submissions::delete_submission),
        )
        .route("/{id}/status", put(submissions::update_status))
}
