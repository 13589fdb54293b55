//! Token authentication extractor.
//!
//! Accepts `Authorization: Token <key>` or `Authorization: Bearer <key>` and
//! resolves the key to its user through `AuthService`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use quill_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

const NOT_PROVIDED: &str = "Authentication credentials were not provided.";

/// The authenticated caller. Extracting this validates the token.
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let user = state.auth_service.resolve(&token).await?;
        tracing::debug!(user_id = user.id, "Request authenticated");
        Ok(AuthUser(user))
    }
}

/// Extract the token key from the `Authorization` header.
fn extract_token(parts: &Parts) -> Result<String, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Err(AppError::Unauthorized(NOT_PROVIDED.to_string()));
    };

    let value = header.to_str().map_err(|_| {
        AppError::Unauthorized(
            "Invalid token header. Token string should not contain invalid characters."
                .to_string(),
        )
    })?;

    let mut words = value.split_whitespace();
    let scheme = words.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized(NOT_PROVIDED.to_string()));
    }

    match (words.next(), words.next()) {
        (Some(key), None) => Ok(key.to_string()),
        (None, _) => Err(AppError::Unauthorized(
            "Invalid token header. No credentials provided.".to_string(),
        )),
        (Some(_), Some(_)) => Err(AppError::Unauthorized(
            "Invalid token header. Token string should not contain spaces.".to_string(),
        )),
    }
}
