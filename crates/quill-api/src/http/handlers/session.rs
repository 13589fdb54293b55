//! Session history HTTP handlers.
//!
//! Endpoints:
//! - GET /sessions/      - List the caller's sessions with flattened messages
//! - GET /sessions/{id}/ - Raw exchange log of one owned session

use axum::Json;
use axum::extract::{Path, State};

use quill_types::chat::{SessionLog, SessionSummary};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

/// GET /sessions/ - List the caller's sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    let sessions = state.chat_service.list_sessions(user.id).await?;
    Ok(Json(sessions.iter().map(SessionSummary::from).collect()))
}

/// GET /sessions/{id}/ - Fetch one session's raw log.
///
/// A non-numeric id is reported as not found, like a foreign or missing one.
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SessionLog>, AppError> {
    let session_id: i64 = id.parse().map_err(|_| AppError::NotFound)?;
    let session = state.chat_service.get_session(session_id, user.id).await?;
    Ok(Json(SessionLog::from(session)))
}
