// handlers/utils.rs - request body helpers shared by public and protected handlers

use axum::body::Bytes;
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

use crate::api::format::parse_timestamp;
use crate::database::models::TodoStatus;
use crate::error::ApiError;

/// Decode a JSON body on demand. Handlers take raw `Bytes` and call this only
/// after existence and ownership checks, so a malformed body is reported as
/// 400 without jumping ahead of a 404 or 403.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::bad_parameter()
    })
}

/// Column width of every `VARCHAR(255)` field (email, names, title)
pub const MAX_SHORT_TEXT: usize = 255;

/// A required text field: present and not blank
pub fn required(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_parameter()),
    }
}

/// A required field stored in a `VARCHAR(255)` column
pub fn required_short(value: Option<String>) -> Result<String, ApiError> {
    let v = required(value)?;
    if v.chars().count() > MAX_SHORT_TEXT {
        return Err(ApiError::bad_parameter());
    }
    Ok(v)
}

/// Passwords are taken verbatim: only a missing or empty one is rejected
pub fn required_password(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::bad_parameter()),
    }
}

pub fn required_id(value: Option<i64>) -> Result<i64, ApiError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_parameter()),
    }
}

pub fn required_timestamp(value: Option<String>) -> Result<NaiveDateTime, ApiError> {
    let raw = required(value)?;
    parse_timestamp(&raw).ok_or_else(ApiError::bad_parameter)
}

pub fn parse_status(raw: &str) -> Result<TodoStatus, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_parameter())
}

/// Numeric path segment; anything else cannot name a stored record
pub fn parse_record_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        title: Option<String>,
    }

    #[test]
    fn malformed_json_is_a_bad_parameter() {
        let err = parse_body::<Sample>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = parse_body::<Sample>(&Bytes::new()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_fields_parse_as_none() {
        let sample: Sample = parse_body(&Bytes::from_static(b"{}")).unwrap();
        assert!(sample.title.is_none());
    }

    #[test]
    fn blank_text_is_missing() {
        assert!(required(None).is_err());
        assert!(required(Some(String::new())).is_err());
        assert!(required(Some("  ".to_string())).is_err());
        assert_eq!(required(Some("x".to_string())).unwrap(), "x");
    }

    #[test]
    fn short_text_is_bounded_by_column_width() {
        let max = "é".repeat(MAX_SHORT_TEXT);
        assert_eq!(required_short(Some(max.clone())).unwrap(), max);

        let too_long = "x".repeat(MAX_SHORT_TEXT + 1);
        let err = required_short(Some(too_long)).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(required_short(Some(" ".to_string())).is_err());
    }

    #[test]
    fn whitespace_passwords_are_accepted() {
        assert!(required_password(None).is_err());
        assert!(required_password(Some(String::new())).is_err());
        assert_eq!(required_password(Some("   ".to_string())).unwrap(), "   ");
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(required_id(None).is_err());
        assert!(required_id(Some(0)).is_err());
        assert_eq!(required_id(Some(3)).unwrap(), 3);
    }

    #[test]
    fn record_ids_are_numeric() {
        assert_eq!(parse_record_id("12"), Some(12));
        assert_eq!(parse_record_id("abc"), None);
        assert_eq!(parse_record_id("1.5"), None);
    }

    #[test]
    fn status_and_timestamp_validation() {
        assert_eq!(parse_status("in progress").unwrap(), TodoStatus::InProgress);
        assert!(parse_status("blocked").is_err());
        assert!(required_timestamp(Some("2025-12-01 10:00:00".to_string())).is_ok());
        assert!(required_timestamp(Some("soon".to_string())).is_err());
    }
}
