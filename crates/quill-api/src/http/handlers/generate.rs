//! Sentence generation handler.
//!
//! POST /generate-sentence/ takes `{input, session_id?, session_title?}`,
//! answers chart shortcuts locally or calls the completion service, appends
//! the exchange to the session, and returns the reply as a JSON string. The
//! session id is returned in the `X-Session-Id` header.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use quill_core::chat::service::GenerateRequest;

use crate::http::body::parse_json_object;
use crate::http::error::AppError;
use crate::http::extractors::auth::AuthUser;
use crate::state::AppState;

/// Response header carrying the created or continued session id.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// A validated generate payload.
#[derive(Debug, PartialEq, Eq)]
struct GeneratePayload {
    input: String,
    session_id: Option<i64>,
    session_title: Option<String>,
}

impl GeneratePayload {
    /// Validate in order: empty body, missing input, empty input, session id.
    fn parse(bytes: &Bytes) -> Result<Self, AppError> {
        let Some(object) = parse_json_object(bytes)? else {
            return Err(AppError::BadRequest("Request body is empty".to_string()));
        };

        let input = match object.get("input") {
            None => {
                return Err(AppError::BadRequest(
                    "Missing 'input' key in request body".to_string(),
                ));
            }
            Some(value) => input_text(value)?,
        };
        if input.is_empty() {
            return Err(AppError::BadRequest("Input text is empty".to_string()));
        }

        Ok(Self {
            input,
            session_id: session_id(object.get("session_id"))?,
            session_title: object
                .get("session_title")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Text of the `input` field. Numbers are taken verbatim; null and false count as empty.
fn input_text(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::BadRequest("Input text must be a string".to_string())),
    }
}

/// Optional session id. Absent, null, 0 and "" all start a new session.
fn session_id(value: Option<&Value>) -> Result<Option<i64>, AppError> {
    let invalid = || AppError::BadRequest("Invalid 'session_id'".to_string());
    let id = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid)?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };
    Ok((id != 0).then_some(id))
}

/// POST /generate-sentence/ - Produce and record a reply.
pub async fn generate_sentence(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Bytes,
) -> Result<Response, AppError> {
    let payload = GeneratePayload::parse(&body)?;

    let reply = state
        .chat_service
        .generate(
            user.id,
            GenerateRequest {
                session_id: payload.session_id,
                session_title: payload.session_title.as_deref(),
                input: &payload.input,
            },
        )
        .await?;

    let mut response = Json(reply.text).into_response();
    response
        .headers_mut()
        .insert(SESSION_ID_HEADER, HeaderValue::from(reply.session_id));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<GeneratePayload, AppError> {
        GeneratePayload::parse(&Bytes::copy_from_slice(body.as_bytes()))
    }

    fn bad_request(result: Result<GeneratePayload, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(bad_request(parse("")), "Request body is empty");
        assert_eq!(bad_request(parse("{}")), "Request body is empty");
        assert_eq!(
            bad_request(parse(r#"{"session_id": 3}"#)),
            "Missing 'input' key in request body"
        );
        assert_eq!(bad_request(parse(r#"{"input": ""}"#)), "Input text is empty");
        assert_eq!(bad_request(parse(r#"{"input": null}"#)), "Input text is empty");
    }

    #[test]
    fn test_full_payload() {
        let payload = parse(r#"{"input": "sun", "session_id": "7", "session_title": "Trip"}"#)
            .unwrap();
        assert_eq!(
            payload,
            GeneratePayload {
                input: "sun".to_string(),
                session_id: Some(7),
                session_title: Some("Trip".to_string()),
            }
        );
    }

    #[test]
    fn test_falsy_session_id_starts_new_session() {
        for body in [
            r#"{"input": "sun"}"#,
            r#"{"input": "sun", "session_id": null}"#,
            r#"{"input": "sun", "session_id": 0}"#,
            r#"{"input": "sun", "session_id": ""}"#,
        ] {
            assert_eq!(parse(body).unwrap().session_id, None, "{body}");
        }
    }

    #[test]
    fn test_invalid_session_id() {
        assert_eq!(
            bad_request(parse(r#"{"input": "sun", "session_id": "abc"}"#)),
            "Invalid 'session_id'"
        );
        assert!(parse(r#"{"input": "sun", "session_id": [1]}"#).is_err());
    }

    #[test]
    fn test_numeric_input_is_text() {
        assert_eq!(parse(r#"{"input": 42}"#).unwrap().input, "42");
    }
}
