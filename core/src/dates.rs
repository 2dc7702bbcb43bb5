//! Serde helpers for timestamp fields in response shapes.
//!
//! Decoding accepts the two formats servers of this API family emit, tried
//! in order: [`STANDARD`] then [`STANDARD_T`]. Encoding always writes
//! [`STANDARD`].
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct Event {
//!     #[serde(with = "request_core::dates")]
//!     at: chrono::NaiveDateTime,
//!     #[serde(default, with = "request_core::dates::option")]
//!     closed_at: Option<chrono::NaiveDateTime>,
//! }
//! ```

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serializer};

/// `2024-05-01 13:45:00`
pub const STANDARD: &str = "%Y-%m-%d %H:%M:%S";

/// `2024-05-01T13:45:00`
pub const STANDARD_T: &str = "%Y-%m-%dT%H:%M:%S";

pub const FORMATS: [&str; 2] = [STANDARD, STANDARD_T];

/// Parse `text` with the first format that accepts it.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(STANDARD).to_string()
}

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).ok_or_else(|| de::Error::custom(format_args!("unrecognised timestamp {text:?}")))
}

/// Same formats for `Option<NaiveDateTime>`; `null` decodes to `None`.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => super::parse(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format_args!("unrecognised timestamp {text:?}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "crate::dates")]
        at: NaiveDateTime,
        #[serde(default, with = "crate::dates::option")]
        closed_at: Option<NaiveDateTime>,
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn parses_both_formats() {
        assert_eq!(parse("2024-05-01 12:00:00"), Some(noon()));
        assert_eq!(parse("2024-05-01T12:00:00"), Some(noon()));
        assert_eq!(parse("01/05/2024"), None);
    }

    #[test]
    fn field_helpers_decode_and_encode() {
        let decoded: Stamped =
            serde_json::from_str(r#"{"at":"2024-05-01T12:00:00","closed_at":"2024-05-01 12:00:00"}"#).unwrap();
        assert_eq!(decoded.at, noon());
        assert_eq!(decoded.closed_at, Some(noon()));

        let encoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(encoded["at"], "2024-05-01 12:00:00");
    }

    #[test]
    fn missing_optional_timestamp_is_none() {
        let decoded: Stamped = serde_json::from_str(r#"{"at":"2024-05-01 12:00:00"}"#).unwrap();
        assert_eq!(decoded.closed_at, None);
    }

    #[test]
    fn unknown_format_is_an_error() {
        let result: Result<Stamped, _> = serde_json::from_str(r#"{"at":"2024-05-01T12:00:00Z"}"#);
        assert!(result.is_err());
    }
}
