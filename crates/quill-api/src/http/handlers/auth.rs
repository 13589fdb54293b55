//! Account HTTP handlers.
//!
//! Endpoints:
//! - POST /signup/ - Register an account
//! - POST /login/  - Exchange credentials for a token

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;

use quill_types::user::{LoginRequest, LoginResponse, PublicUser, RegisterRequest};

use crate::http::body::parse_json;
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /signup/ - Register a new user.
pub async fn signup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let request: RegisterRequest = parse_json(&body)?;
    let user = state.auth_service.register(&request).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// POST /login/ - Verify credentials and return the user's token.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, AppError> {
    let request: LoginRequest = parse_json(&body)?;
    let (user, token) = state.auth_service.authenticate(&request).await?;
    Ok(Json(LoginResponse::new(&user, &token)))
}
