#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use catalog_core::movie::{MovieChanges, NewMovie};
use catalog_core::types::DbId;
use catalog_db::models::movie::Movie;
use catalog_db::store::MovieStore;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catalog_api::config::{LogFormat, ServerConfig};
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Rows {
    next_id: DbId,
    movies: BTreeMap<DbId, Movie>,
}

/// In-memory `MovieStore` with the same ordering rules as the SQL repository.
#[derive(Default)]
pub struct InMemoryMovieStore {
    rows: Mutex<Rows>,
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().movies.values().cloned().collect())
    }

    async fn top_rated(&self, limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        let mut movies: Vec<Movie> = self.rows.lock().unwrap().movies.values().cloned().collect();
        movies.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.total_cmp(&x).then(a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        movies.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(movies)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().movies.get(&id).cloned())
    }

    async fn create(&self, input: &NewMovie) -> Result<Movie, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        rows.next_id += 1;
        let now = Utc::now();
        let movie = Movie {
            id: rows.next_id,
            name: input.name.clone(),
            category: input.category.clone(),
            year: input.year,
            director: input.director.clone(),
            duration_minutes: input.duration_minutes,
            rating: input.rating,
            created_at: now,
            updated_at: now,
        };
        rows.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        let Some(movie) = rows.movies.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            movie.name = name.clone();
        }
        if let Some(category) = &changes.category {
            movie.category = category.clone();
        }
        if let Some(year) = changes.year {
            movie.year = year;
        }
        if let Some(director) = &changes.director {
            movie.director = director.clone();
        }
        if let Some(minutes) = changes.duration_minutes {
            movie.duration_minutes = minutes;
        }
        if let Some(rating) = changes.rating {
            movie.rating = rating;
        }
        movie.updated_at = Utc::now().max(movie.updated_at + chrono::Duration::microseconds(1));
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.rows.lock().unwrap().movies.remove(&id).is_some())
    }
}

/// A store whose every call fails as if the database were unreachable.
pub struct UnavailableStore;

#[async_trait]
impl MovieStore for UnavailableStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn top_rated(&self, _limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn create(&self, _input: &NewMovie) -> Result<Movie, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(
        &self,
        _id: DbId,
        _changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// A store whose reads never finish within a test's request timeout.
pub struct StalledStore;

#[async_trait]
impl MovieStore for StalledStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn top_rated(&self, _limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Ok(None)
    }

    async fn create(&self, _input: &NewMovie) -> Result<Movie, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(
        &self,
        _id: DbId,
        _changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        Ok(None)
    }

    async fn delete(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
}

/// A store that panics while listing, to exercise panic recovery.
pub struct PanickingStore;

#[async_trait]
impl MovieStore for PanickingStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Movie>, sqlx::Error> {
        panic!("movie list exploded");
    }

    async fn top_rated(&self, _limit: i64) -> Result<Vec<Movie>, sqlx::Error> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Ok(None)
    }

    async fn create(&self, _input: &NewMovie) -> Result<Movie, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(
        &self,
        _id: DbId,
        _changes: &MovieChanges,
    ) -> Result<Option<Movie>, sqlx::Error> {
        Ok(None)
    }

    async fn delete(&self, _id: DbId) -> Result<bool, sqlx::Error> {
        Ok(false)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router around `store`, with the same
/// middleware stack production uses.
pub fn build_test_app_with(store: Arc<dyn MovieStore>) -> Router {
    build_test_app_with_config(store, &test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn MovieStore>, config: &ServerConfig) -> Router {
    build_app_router(AppState { store }, config)
}

/// Router backed by a fresh, empty in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(InMemoryMovieStore::default()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a request and return its status with the parsed JSON body.
pub async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = send(app, method, uri, body).await;
    let status = response.status();
    (status, body_json(response).await)
}
