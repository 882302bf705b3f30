pub mod catalog;
pub mod health;
pub mod send;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /submissions                         list, create (intake)
/// /submissions/send                    submit + deliver (multipart)
/// /submissions/export                  export all as JSON
/// /submissions/import                  replace all from JSON
/// /submissions/ticket/{ticket}         get by ticket number
/// /submissions/{id}                    get, delete
/// /submissions/{id}/status             update status (PUT)
///
/// /catalog/brands                      list (?category=)
/// /catalog/brands/{id}                 get
/// /catalog/models                      list (?brand_id=)
/// /catalog/models/{id}                 get
/// /catalog/options                     categories, conditions, features, accessories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/submissions", submissions::router())
        .nest("/catalog", catalog::router())
}
