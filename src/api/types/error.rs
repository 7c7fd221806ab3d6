//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::AuthError;

/// Error body: `{status:"error", message, code?}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                status: "error".to_string(),
                message: message.into(),
                code: None,
            },
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidCredentials
            | AuthError::AuthHeaderMissing
            | AuthError::MalformedToken
            | AuthError::UnexpectedSigningMethod(_)
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::MissingClaim(_) => StatusCode::UNAUTHORIZED,
            AuthError::AccountSuspended
            | AuthError::AccountNotApproved
            | AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::DataStoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::SigningError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Signing failures carry library detail that stays in the logs
        let message = match &err {
            AuthError::SigningError(_) => "Failed to issue token".to_string(),
            other => other.to_string(),
        };

        Self::new(status, message).with_code(err.kind())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.response.message)
    }
}

impl std::error::Error for ApiError {}
