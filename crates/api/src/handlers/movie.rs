//! Handlers for the `/peliculas` resource.
//!
//! Field validation lives in `catalog_core::movie`; persistence goes
//! through the [`MovieStore`] held in [`AppState`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::movie::{self, CreateMovie, UpdateMovie, DEFAULT_TOP_LIMIT};
use catalog_core::types::DbId;
use catalog_db::models::movie::Movie;
use catalog_db::store::MovieStore;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::TopParams;
use crate::response::Envelope;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: movie::ENTITY,
        id,
    })
}

/// Verify that a movie exists, returning the full row.
async fn ensure_movie_exists(store: &dyn MovieStore, id: DbId) -> AppResult<Movie> {
    store.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// GET /peliculas
// ---------------------------------------------------------------------------

/// List every movie.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let movies = state.store.list().await?;
    tracing::debug!(count = movies.len(), "Listed movies");
    Ok(Json(Envelope::list(movies)))
}

// ---------------------------------------------------------------------------
// GET /peliculas/top
// ---------------------------------------------------------------------------

/// List the highest rated movies, unrated ones last.
pub async fn top_rated(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TopParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    movie::validate_top_limit(limit)?;

    let movies = state.store.top_rated(limit).await?;
    tracing::debug!(count = movies.len(), limit, "Listed top rated movies");

    Ok(Json(
        Envelope::list(movies).with_message(format!("Top {limit} highest rated movies")),
    ))
}

// ---------------------------------------------------------------------------
// GET /peliculas/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let movie = ensure_movie_exists(state.store.as_ref(), id).await?;
    Ok(Json(Envelope::data(movie)))
}

// ---------------------------------------------------------------------------
// POST /peliculas
// ---------------------------------------------------------------------------

/// Create a movie. All validation happens before the insert.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let new_movie = movie::validate_create(input)?;
    let movie = state.store.create(&new_movie).await?;

    tracing::info!(movie_id = movie.id, name = %movie.name, "Movie created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(movie).with_message("Movie created successfully")),
    ))
}

// ---------------------------------------------------------------------------
// PUT /peliculas/{id}
// ---------------------------------------------------------------------------

/// Apply a partial update.
///
/// Existence is checked before the body is looked at, so an unknown id is a
/// 404 even when the payload is invalid.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    body: Result<AppJson<UpdateMovie>, AppError>,
) -> AppResult<impl IntoResponse> {
    ensure_movie_exists(state.store.as_ref(), id).await?;

    let AppJson(input) = body?;
    let changes = movie::validate_update(input)?;

    let movie = state
        .store
        .update(id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(movie_id = id, "Movie updated");

    Ok(Json(
        Envelope::data(movie).with_message("Movie updated successfully"),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /peliculas/{id}
// ---------------------------------------------------------------------------

/// Permanently delete a movie.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(movie_id = id, "Movie deleted");

    Ok(Json(Envelope::acknowledge("Movie deleted successfully")))
}
