pub mod health;
pub mod websites;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /websites                                  list, create
/// /websites/extension                        minimal projection for the extension
/// /websites/{id}                             get (UUID or domain), update, delete
/// /websites/{id}/verify                      admin verify
/// /websites/{id}/occurrences                 list, report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/websites", websites::router())
}
