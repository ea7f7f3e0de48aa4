//! Repository for the `movies` table.
//!
//! Every write runs in its own transaction. Returning early with `?` drops
//! the transaction, which rolls it back.

use catalog_core::movie::{MovieChanges, NewMovie};
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::Movie;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, category, year, director, duration_minutes, rating, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// List all movies in ascending id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// List up to `limit` movies by rating, highest first.
    ///
    /// Unrated movies sort after every rated one; ties break by id.
    pub async fn top_rated(pool: &PgPool, limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies \
             ORDER BY rating DESC NULLS LAST, id \
             LIMIT $1"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a movie by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a validated movie, returning the created row.
    ///
    /// `created_at` and `updated_at` both take the column default, so they
    /// are equal on the new row.
    pub async fn create(pool: &PgPool, input: &NewMovie) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movies (name, category, year, director, duration_minutes, rating) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.year)
            .bind(&input.director)
            .bind(input.duration_minutes)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(movie)
    }

    /// Apply a partial update. Only supplied fields are written.
    ///
    /// The row is locked before the update. `updated_at` always moves
    /// forward, even when two updates land within the same clock tick.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tracing::debug!(movie_id = id, "Update target missing, rolling back");
            return Ok(None);
        }

        let query = format!(
            "UPDATE movies SET \
                name = COALESCE($2, name), \
                category = COALESCE($3, category), \
                year = COALESCE($4, year), \
                director = COALESCE($5, director), \
                duration_minutes = COALESCE($6, duration_minutes), \
                rating = CASE WHEN $7 THEN $8 ELSE rating END, \
                updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.category)
            .bind(changes.year)
            .bind(&changes.director)
            .bind(changes.duration_minutes)
            .bind(changes.rating.is_some())
            .bind(changes.rating.flatten())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(movie))
    }

    /// Permanently delete a movie by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
