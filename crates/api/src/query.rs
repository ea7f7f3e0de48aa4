//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /peliculas/top` (`?limit=`).
///
/// Falls back to `catalog_core::movie::DEFAULT_TOP_LIMIT` when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct TopParams {
    pub limit: Option<i64>,
}
