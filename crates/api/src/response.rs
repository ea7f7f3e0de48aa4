//! Shared response envelope for API handlers.
//!
//! Every endpoint answers with
//! `{ "success": bool, "data"?, "error"?, "message"?, "total"? }`.
//! Members that are `None` are omitted from the JSON.

use serde::Serialize;

/// Standard response envelope.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use catalog_api::response::Envelope;
///
/// let Json(body) = Json(Envelope::list(vec!["Alien", "Heat"]));
/// assert_eq!(body.total, Some(2));
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            total: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Successful response carrying a collection and its length as `total`.
    pub fn list(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            total: Some(total),
            ..Self::data(items)
        }
    }
}

impl Envelope<()> {
    /// Successful response with only a message (no `data`).
    pub fn acknowledge(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
            total: None,
        }
    }

    /// Failed response. `message` carries optional diagnostic detail.
    pub fn failure(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message,
            total: None,
        }
    }
}
