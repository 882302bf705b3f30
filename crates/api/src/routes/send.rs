//! Route definitions for the legacy delivery endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::send;
use crate::state::AppState;

/// Routes mounted at the root, next to `/health`.
///
/// ```text
/// POST   /send    -> send_assembled
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/send", post(send::send_assembled))
}
