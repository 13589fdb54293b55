//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Body shapes follow what existing clients parse: field errors as
//! `{"field": ["message"]}`, generate failures as `{"error": ...}`, and
//! auth/not-found failures as `{"detail": ...}`.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use quill_types::error::{AuthError, ChatError, CompletionError, FieldErrors, SessionError};

/// Message returned for a failed login.
pub const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Per-field validation failures.
    Fields(FieldErrors),
    /// Login with an unknown username or wrong password.
    InvalidCredentials,
    /// Rejected generate payload.
    BadRequest(String),
    /// Body that is not parseable JSON.
    Malformed(String),
    /// Missing or invalid token.
    Unauthorized(String),
    NotFound,
    /// Completion service failure.
    Upstream(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(errors) => AppError::Fields(errors),
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::Unauthenticated => AppError::Unauthorized("Invalid token.".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound => AppError::NotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::UpstreamFailure(msg) => AppError::Upstream(msg),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Session(e) => e.into(),
            ChatError::Completion(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Fields(errors) => (StatusCode::BAD_REQUEST, json!(errors)),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "non_field_errors": [INVALID_CREDENTIALS] }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Malformed(msg) => (StatusCode::BAD_REQUEST, json!({ "detail": msg })),
            AppError::Unauthorized(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Token")],
                    axum::Json(json!({ "detail": msg })),
                )
                    .into_response();
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, json!({ "detail": "Not found." })),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Completion failed: {msg}") }),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Fields(FieldErrors::single("username", "x")), 400),
            (AppError::InvalidCredentials, 400),
            (AppError::BadRequest("x".into()), 400),
            (AppError::Malformed("x".into()), 400),
            (AppError::Unauthorized("x".into()), 401),
            (AppError::NotFound, 404),
            (AppError::Upstream("x".into()), 500),
            (AppError::Internal("x".into()), 500),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status().as_u16(), status);
        }
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = AppError::Unauthorized("Invalid token.".into()).into_response();
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Token");
    }

    #[test]
    fn test_domain_error_conversions() {
        assert!(matches!(
            AppError::from(ChatError::Session(SessionError::NotFound)),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(ChatError::Completion(CompletionError::UpstreamFailure("t".into()))),
            AppError::Upstream(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::Storage("db".into())),
            AppError::Internal(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::Unauthenticated),
            AppError::Unauthorized(_)
        ));
    }
}
