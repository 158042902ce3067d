//! Route definitions for the `/websites` resource.
//!
//! Also nests occurrence routes under `/websites/{id}/occurrences`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{occurrences, websites};
use crate::state::AppState;

/// Routes mounted at `/websites`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create (201 new, 200 existing domain)
/// GET    /extension             -> list_for_extension
/// GET    /{id}                  -> get (UUID or domain)
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/verify           -> verify
/// GET    /{id}/occurrences      -> list_by_website
/// POST   /{id}/occurrences      -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(websites::list).post(websites::create))
        .route("/extension", get(websites::list_for_extension))
        .route(
            "/{id}",
            get(websites::get)
                .put(websites::update)
                .delete(websites::delete),
        )
        .route("/{id}/verify", post(websites::verify))
        .route(
            "/{id}/occurrences",
            get(occurrences::list_by_website).post(occurrences::create),
        )
}
