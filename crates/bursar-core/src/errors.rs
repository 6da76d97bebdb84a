//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. The error renders as
//!
//! ```json
//! { "error": { "code": "USER_ALREADY_EXISTS", "detail": "..." } }
//! ```
//!
//! Server errors (5xx) are logged with their full chain and rendered with a
//! generic detail so internal failure text never reaches a client.

use anyhow::Error;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

pub mod codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    pub const INVALID_USER_CREDS: &str = "INVALID_USER_CREDS";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNHANDLED_EXCEPTION: &str = "UNHANDLED_EXCEPTION";
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::UNHANDLED_EXCEPTION,
            err,
        )
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            codes::VALIDATION_ERROR,
            err,
        )
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, codes::UNAUTHENTICATED, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, codes::USER_ALREADY_EXISTS, err)
    }

    /// The detail shown to the client.
    pub fn detail(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), code = self.code, error = ?self.error, "Unhandled error");
        }

        let body = Json(json!({
            "error": {
                "code": self.code,
                "detail": self.detail(),
            }
        }));

        let mut response = (self.status, body).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
