//! Shared response envelope for API handlers.
//!
//! Every JSON response, success or error, uses the same envelope:
//!
//! ```json
//! { "status": "success", "timestamp": "2026-03-01T12:00:00Z",
//!   "message": "Website found", "data": { ... }, "metadata": { ... } }
//! ```
//!
//! `data` and `metadata` are omitted when absent.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    /// RFC 3339 UTC timestamp with second precision.
    pub timestamp: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ListMetadata>,
}

/// Pagination details attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListMetadata {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            timestamp: now_rfc3339(),
            message: message.into(),
            data: Some(data),
            metadata: None,
        }
    }

    /// Error-status envelope that still carries a payload.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_ERROR,
            ..Self::success(message, data)
        }
    }

    pub fn with_metadata(mut self, metadata: ListMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            timestamp: now_rfc3339(),
            message: message.into(),
            data: None,
            metadata: None,
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
