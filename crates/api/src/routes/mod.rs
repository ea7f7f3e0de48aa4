pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health                 service and database health
/// /peliculas              list, create
/// /peliculas/top          top rated
/// /peliculas/{id}         get, update, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(movie::router())
}
