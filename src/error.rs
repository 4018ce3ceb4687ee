// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};

use crate::middleware::response::Envelope;

pub const MSG_UNAUTHENTICATED: &str = "User ID is required";
pub const MSG_NOT_OWNER: &str = "Unauthorized";
pub const MSG_PROPERTY_NOT_FOUND: &str = "Property Not Found";
pub const MSG_PROPERTY_MISSING: &str = "Property does not exist";
pub const MSG_SOMETHING_WENT_WRONG: &str = "Something Went Wrong";
pub const MSG_UPDATE_FAILED: &str = "Failed to add property";

/// Terminal outcome of a property request that did not succeed.
///
/// Bodies are plain text so existing clients can keep matching on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No identity on the request
    Unauthenticated,

    /// Target record absent
    NotFound(&'static str),

    /// Identity present but not the record owner. Reported as 401, not 403,
    /// to stay compatible with existing clients.
    Forbidden,

    /// Anything else. The fault has already been logged; only the generic
    /// message reaches the caller.
    InternalError(&'static str),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => MSG_UNAUTHENTICATED,
            ApiError::NotFound(msg) => msg,
            ApiError::Forbidden => MSG_NOT_OWNER,
            ApiError::InternalError(msg) => msg,
        }
    }

    /// Log `fault` for operators and hide it behind `message`
    pub fn internal(fault: impl std::fmt::Display, message: &'static str) -> Self {
        tracing::error!(error = %fault, "{}", message);
        ApiError::InternalError(message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Every error exit goes through the same envelope as success responses
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        Envelope::text(self.status_code(), self.message()).into_response()
    }
}
