//! Shared response envelope for API handlers.
//!
//! Every JSON response, success or failure, is wrapped as
//! `{ "code": ..., "count": ..., "data": ..., "message": ... }`. The `code`
//! field is always the HTTP status written on the response line.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Envelope::new(StatusCode::CREATED, product, messages::CREATED))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    #[serde(rename = "code", serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// Number of items in `data`; only list responses set it.
    pub count: usize,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            count: 0,
            data: Some(data),
            message: message.into(),
        }
    }

    /// An envelope with `data: null`.
    pub fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            count: 0,
            data: None,
            message: message.into(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Wrap a collection, setting `count` to its length.
    pub fn list(status: StatusCode, items: Vec<T>, message: impl Into<String>) -> Self {
        let count = items.len();
        Self::new(status, items, message).with_count(count)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
