//! API response envelopes
//!
//! Every endpoint answers with one of two shapes:
//!
//! ```json
//! { "status": "success", "requestId": "...", "data": { ... } }
//! { "status": "error", "requestId": "...", "error": { "message": "...", "code": "...", "details": { ... } } }
//! ```

use serde::{Deserialize, Serialize};

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Error payload carried by an error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,

    /// Stable machine-readable code
    pub code: String,

    /// Additional structured context (validation fields, limits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub status: ResponseStatus,

    /// Correlation id of the request
    pub request_id: String,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, request_id: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            request_id: request_id.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            status: ResponseStatus::Error,
            request_id: request_id.into(),
            data: None,
            error: Some(ErrorBody {
                message: message.into(),
                code: code.into(),
                details: None,
            }),
        }
    }

    /// Attach structured details to an error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.details = Some(details);
        }
        self
    }
}
