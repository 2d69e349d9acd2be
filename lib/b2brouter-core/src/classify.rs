//! Response classification.
//!
//! Turns a raw [`Response`] into either a payload or an [`ApiError`]. The JSON
//! and binary paths only differ on success; failures go through
//! [`ApiError::from_response`] in both cases.

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{ApiError, ApiErrorKind, Response, Result};

/// Message used when a failure response carries no usable text at all.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Decode a body as JSON, whatever its content type.
///
/// Returns `None` for an empty or malformed body.
#[must_use]
pub fn decode_json_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Pick the message of a failure response.
///
/// Looks, in order, at `error.message`, `message` and `error` in a decoded
/// JSON object, then at the raw body text, then falls back to
/// [`UNKNOWN_ERROR`]. String values are used verbatim; other values are
/// re-encoded as compact JSON. `null` values count as absent.
#[must_use]
pub fn extract_message(json_body: Option<&Value>, raw_body: &[u8]) -> String {
    if let Some(Value::Object(fields)) = json_body {
        let nested = fields
            .get("error")
            .and_then(Value::as_object)
            .and_then(|error| error.get("message"));

        let candidate = [nested, fields.get("message"), fields.get("error")]
            .into_iter()
            .flatten()
            .find(|value| !value.is_null());

        if let Some(value) = candidate {
            return value_text(value);
        }
    }

    if raw_body.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        String::from_utf8_lossy(raw_body).into_owned()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl ApiError {
    /// Build the error for a failure response.
    ///
    /// Returns `None` when the status is below 400.
    #[must_use]
    pub fn from_response(response: &Response<Bytes>) -> Option<Self> {
        if !response.is_error() {
            return None;
        }
        let kind = ApiErrorKind::from_status(response.status()).unwrap_or(ApiErrorKind::Api);
        let json_body = decode_json_body(response.body());
        let message = extract_message(json_body.as_ref(), response.body());

        Some(Self {
            kind,
            message,
            status: response.status(),
            body: response.body().clone(),
            json_body,
            headers: response.headers().clone(),
        })
    }
}

/// Classify a response to a JSON-mode call.
///
/// On success the decoded body is returned; an empty, malformed or `null`
/// body yields an empty JSON object. Only those collapse to `{}`: any other
/// decoded value, including `0`, `false`, `""` and `[]`, is returned as-is.
///
/// # Errors
///
/// Returns [`crate::Error::Api`] when the status is 400 or above.
pub fn classify_json(response: Response<Bytes>) -> Result<Value> {
    check_status(&response)?;
    Ok(match decode_json_body(response.body()) {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    })
}

/// Classify a response to a binary-mode call.
///
/// On success the body is returned untouched, even when it happens to be JSON.
///
/// # Errors
///
/// Returns [`crate::Error::Api`] when the status is 400 or above.
pub fn classify_binary(response: Response<Bytes>) -> Result<Bytes> {
    check_status(&response)?;
    Ok(response.into_body())
}

fn check_status(response: &Response<Bytes>) -> Result<()> {
    match ApiError::from_response(response) {
        None => Ok(()),
        Some(error) => {
            debug!(
                status = error.status(),
                kind = %error.kind(),
                error_message = error.message(),
                "API returned an error"
            );
            Err(error.into())
        }
    }
}
