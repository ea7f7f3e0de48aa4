//! Route definitions for movies.

use axum::routing::get;
use axum::Router;

use crate::handlers::movie;
use crate::state::AppState;

/// Routes for the `/peliculas` resource.
///
/// ```text
/// GET    /peliculas        -> list
/// POST   /peliculas        -> create
/// GET    /peliculas/top    -> top_rated (?limit=)
/// GET    /peliculas/{id}   -> get_by_id
/// PUT    /peliculas/{id}   -> update
/// DELETE /peliculas/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/peliculas", get(movie::list).post(movie::create))
        .route("/peliculas/top", get(movie::top_rated))
        .route(
            "/peliculas/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
}
