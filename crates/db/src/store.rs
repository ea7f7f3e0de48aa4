//! Storage port for the movie catalog.
//!
//! Handlers talk to a [`MovieStore`] held in application state rather than
//! to a global connection, so tests can swap in their own implementation.

use async_trait::async_trait;
use catalog_core::movie::{MovieChanges, NewMovie};
use catalog_core::types::DbId;

use crate::models::movie::Movie;
use crate::repositories::MovieRepo;
use crate::DbPool;

/// Persistence operations required by the HTTP layer.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// All movies in storage order.
    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error>;

    /// Up to `limit` movies by rating descending, unrated last.
    async fn top_rated(&self, limit: i64) -> Result<Vec<Movie>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error>;

    async fn create(&self, input: &NewMovie) -> Result<Movie, sqlx::Error>;

    /// Returns `None` when `id` does not exist.
    async fn update(&self, id: DbId, changes: &MovieChanges)
        -> Result<Option<Movie>, sqlx::Error>;

    /// Returns `false` when `id` does not exist.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// [`MovieStore`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error> {
        MovieRepo::list(&self.pool).await
    }

    async fn top_rated(&self, limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        MovieRepo::top_rated(&self.pool, limit).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        MovieRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &NewMovie) -> Result<Movie, sqlx::Error> {
        MovieRepo::create(&self.pool, input).await
    }

    async fn update(
        &self,
        id: DbId,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        MovieRepo::update(&self.pool, id, changes).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        MovieRepo::delete(&self.pool, id).await
    }
}
