//! Error taxonomy of the proxy.
//!
//! Every handler and every call into the Spotify client returns [`ApiError`].
//! The enum knows which HTTP status it maps to and renders itself as the
//! minimal `{"error": "..."}` body the front-end expects, logging the full
//! detail server-side on the way out.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::warning;

#[derive(Debug)]
pub enum ApiError {
    /// Bad query or path parameters; never forwarded upstream.
    Validation(String),
    /// No access token in the session.
    AuthRequired,
    /// Access token present but past its expiry.
    TokenExpired,
    /// `/auth/refresh` called without a refresh token in the session.
    NoRefreshToken,
    /// The token endpoint rejected a code or refresh token.
    UpstreamAuth(String),
    /// Non-2xx answer, network failure or timeout talking to the Web API.
    Upstream {
        status: Option<StatusCode>,
        message: String,
    },
    NotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthRequired
            | ApiError::TokenExpired
            | ApiError::NoRefreshToken
            | ApiError::UpstreamAuth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream { status, .. } => match status {
                Some(s)
                    if *s == StatusCode::UNAUTHORIZED
                        || *s == StatusCode::FORBIDDEN
                        || *s == StatusCode::NOT_FOUND
                        || *s == StatusCode::TOO_MANY_REQUESTS =>
                {
                    *s
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the caller. Upstream bodies stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::AuthRequired => "Authentication required".to_string(),
            ApiError::TokenExpired => "Token expired".to_string(),
            ApiError::NoRefreshToken => "No refresh token available".to_string(),
            ApiError::UpstreamAuth(_) => "Failed to authenticate with Spotify".to_string(),
            ApiError::Upstream { .. } => match self.status() {
                StatusCode::UNAUTHORIZED => "Unauthorized".to_string(),
                StatusCode::FORBIDDEN => "Forbidden".to_string(),
                StatusCode::NOT_FOUND => "Not found".to_string(),
                StatusCode::TOO_MANY_REQUESTS => "Rate limited by Spotify".to_string(),
                _ => "Upstream request failed".to_string(),
            },
            ApiError::NotFound => "Route not found".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "validation error: {}", msg),
            ApiError::AuthRequired => write!(f, "authentication required"),
            ApiError::TokenExpired => write!(f, "token expired"),
            ApiError::NoRefreshToken => write!(f, "no refresh token in session"),
            ApiError::UpstreamAuth(msg) => write!(f, "token endpoint rejected request: {}", msg),
            ApiError::Upstream {
                status: Some(status),
                message,
            } => write!(f, "upstream returned {}: {}", status, message),
            ApiError::Upstream {
                status: None,
                message,
            } => write!(f, "upstream unreachable: {}", message),
            ApiError::NotFound => write!(f, "route not found"),
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Upstream {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warning!("{} -> {}", self, status);
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
