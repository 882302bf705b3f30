//! Route definitions for the `/catalog` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`.
///
/// ```text
/// GET    /brands          -> list_brands  (?category=)
/// GET    /brands/{id}     -> get_brand
/// GET    /models          -> list_models  (?brand_id=)
/// GET    /models/{id}     -> get_model
/// GET    /options         -> options
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brands", get(catalog::list_brands))
        .route("/brands/{id}", get(catalog::get_brand))
        .route("/models", get(catalog::list_models))
        .route("/models/{id}", get(catalog::get_model))
        .route("/options", get(catalog::options))
}
