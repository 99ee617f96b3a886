//! Error types
//!
//! The pagination middleware itself never fails: unparsable query values
//! fall back to defaults. Errors only appear at the edges, when a handler
//! insists on a [`PageInfo`](crate::PageInfo) that was never stored, and
//! when the demo server loads its config file.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON envelope used for every response produced by this crate.
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Rejection returned by the strict [`PageInfo`](crate::PageInfo) extractor.
#[derive(Debug, Error)]
pub enum PaginateError {
    #[error("Pagination info is missing from the request")]
    Missing,
}

impl IntoResponse for PaginateError {
    fn into_response(self) -> Response {
        let status = match self {
            PaginateError::Missing => StatusCode::BAD_REQUEST,
        };
        let body = ApiResponse::<()>::error(self.to_string());
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_renders_400_envelope() {
        let resp = PaginateError::Missing.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(
            body["error"],
            "Pagination info is missing from the request"
        );
    }

    #[test]
    fn success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 5}));
    }
}
