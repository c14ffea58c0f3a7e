// ABOUTME: Normalizes node responses into a decoded JSON value or an ApiError
// Non-success bodies are decoded for a `message` field, falling back to "Unknown error"

use reqwest::StatusCode;
use serde_json::Value;

use super::error::{ApiError, ApiResult};

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Reads the full body and hands it to [`decode_body`].
pub async fn unwrap_response(response: reqwest::Response) -> ApiResult<Value> {
    let status = response.status();
    let body = response.bytes().await?;
    decode_body(status, &body)
}

/// Both branches decode the body as JSON first, so a non-JSON body is a
/// `Decode` error regardless of status.
pub fn decode_body(status: StatusCode, body: &[u8]) -> ApiResult<Value> {
    let value: Value = serde_json::from_slice(body)?;

    if status.is_success() {
        return Ok(value);
    }

    Err(ApiError::Server {
        status: status.as_u16(),
        message: server_message(&value),
    })
}

/// Falsy values (missing, null, false, 0, "") fall back to [`UNKNOWN_ERROR`].
fn server_message(body: &Value) -> String {
    match body.get("message") {
        None | Some(Value::Null | Value::Bool(false)) => UNKNOWN_ERROR.to_string(),
        Some(Value::String(s)) if s.is_empty() => UNKNOWN_ERROR.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn failure_message(status: StatusCode, body: &str) -> String {
        match decode_body(status, body.as_bytes()) {
            Err(ApiError::Server { message, .. }) => message,
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_body_is_returned_unchanged() {
        let value = decode_body(StatusCode::OK, br#"{"a":1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_created_counts_as_success() {
        let value = decode_body(
            StatusCode::CREATED,
            br#"{"message":"Transaction will be added to Block 2"}"#,
        )
        .unwrap();
        assert_eq!(value["message"], "Transaction will be added to Block 2");
    }

    #[test]
    fn test_failure_carries_server_message() {
        assert_eq!(
            failure_message(StatusCode::BAD_REQUEST, r#"{"message":"bad request"}"#),
            "bad request"
        );
    }

    #[test]
    fn test_failure_without_message_is_unknown_error() {
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, r#"{"error":"x"}"#), UNKNOWN_ERROR);
        assert_eq!(failure_message(StatusCode::INTERNAL_SERVER_ERROR, "{}"), UNKNOWN_ERROR);
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, r#"{"message":""}"#), UNKNOWN_ERROR);
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, r#"{"message":null}"#), UNKNOWN_ERROR);
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, "[]"), UNKNOWN_ERROR);
    }

    #[test]
    fn test_non_string_message_is_rendered() {
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, r#"{"message":42}"#), "42");
    }

    #[test]
    fn test_failure_status_is_preserved() {
        let err = decode_body(StatusCode::NOT_FOUND, br#"{"message":"nope"}"#).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        let err = decode_body(
            StatusCode::BAD_REQUEST,
            b"Error: Please supply a valid list of nodes",
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));

        let err = decode_body(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
