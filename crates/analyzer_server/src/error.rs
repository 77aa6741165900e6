use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Unified error type for API responses. Every variant renders as
/// `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request fields; no remote call was made
    BadRequest(String),
    /// The inference provider answered with an error envelope, passed through
    Upstream(Value),
    /// Transport failure, deadline, cancellation, or anything else
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::Upstream(payload) => write!(f, "upstream_error: {payload}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
                (StatusCode::BAD_REQUEST, Value::String(msg))
            }
            Self::Upstream(payload) => {
                analyzer_observability::record_error(&format!("Inference API error: {payload}"));
                (StatusCode::INTERNAL_SERVER_ERROR, payload)
            }
            Self::Internal(msg) => {
                analyzer_observability::record_error(&format!("Server error: {msg}"));
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
        };

        (status, axum::Json(json!({ "error": error }))).into_response()
    }
}

impl From<analyzer_llms::Error> for ApiError {
    fn from(e: analyzer_llms::Error) -> Self {
        match e {
            analyzer_llms::Error::Api { payload, .. } => Self::Upstream(payload),
            other => Self::Internal(other.to_string()),
        }
    }
}
