use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::Serializer;

/// Canonical wire format for every timestamp the API emits
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input layouts, tried in order. The last two cover what an HTML
/// `datetime-local` input produces.
const INPUT_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a client supplied timestamp. RFC 3339 values carrying an offset are
/// normalized to UTC before the offset is dropped. Fractional seconds are
/// truncated so the stored value is exactly what gets emitted.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.naive_utc())
        })?;

    Some(parsed.with_nanosecond(0).unwrap_or(parsed))
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// `#[serde(with = "crate::api::format::timestamp")]` helper for output-only
/// models
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(dt))
    }
}
