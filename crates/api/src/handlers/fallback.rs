//! Fallbacks for requests that match no handler.

use crate::error::AppError;

/// Any path without a route.
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

/// A known path requested with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
