//! Request body parsing.
//!
//! Handlers take the raw body so that an empty body, malformed JSON and a
//! missing key each get their own 400 response instead of a generic
//! extractor rejection.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::http::error::AppError;

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn malformed(e: serde_json::Error) -> AppError {
    AppError::Malformed(format!("JSON parse error - {e}"))
}

/// Deserialize a JSON body, treating an empty body as `T::default()`.
pub fn parse_json<T: DeserializeOwned + Default>(bytes: &Bytes) -> Result<T, AppError> {
    if is_blank(bytes) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(malformed)
}

/// Parse a JSON object body.
///
/// Returns `None` for an empty body, `null`, `{}` or `[]`.
pub fn parse_json_object(bytes: &Bytes) -> Result<Option<Map<String, Value>>, AppError> {
    if is_blank(bytes) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(bytes).map_err(malformed)? {
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        _ => Err(AppError::Malformed(
            "Request body must be a JSON object".to_string(),
        )),
    }
}
