//! Serde adapter for fields that are absent in memory and `"Unknown"` on disk.
//!
//! Snapshot files written by earlier runs use the literal string `"Unknown"`
//! for every field that has not been populated. Use with
//! `#[serde(default, with = "crate::unknown")]` on an `Option<T>` field where
//! `T: Display + FromStr`.
//!
//! Deserialization treats `"Unknown"` (any case), empty strings and `null` as
//! absent. Serialization always writes `"Unknown"` for `None`.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serializer};

/// The on-disk sentinel for an unpopulated field.
pub const UNKNOWN: &str = "Unknown";

/// Returns `true` if `s` is the `Unknown` sentinel, ignoring case and padding.
#[must_use]
pub fn is_unknown(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case(UNKNOWN)
}

/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_str(UNKNOWN),
    }
}

/// # Errors
///
/// Returns a deserialization error if the value is neither a string nor
/// `null`, or if a non-sentinel string fails `T::from_str`.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: fmt::Display,
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if is_unknown(s) => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, with = "crate::unknown")]
        value: Option<String>,
    }

    #[test]
    fn none_serializes_as_unknown() {
        let json = serde_json::to_string(&Holder { value: None }).unwrap();
        assert_eq!(json, r#"{"value":"Unknown"}"#);
    }

    #[test]
    fn some_serializes_verbatim() {
        let json = serde_json::to_string(&Holder {
            value: Some("R250 per patch".to_string()),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"R250 per patch"}"#);
    }

    #[test]
    fn sentinel_variants_deserialize_as_none() {
        for raw in [
            r#"{"value":"Unknown"}"#,
            r#"{"value":"unknown"}"#,
            r#"{"value":"  UNKNOWN "}"#,
            r#"{"value":""}"#,
            r#"{"value":null}"#,
            r"{}",
        ] {
            let h: Holder = serde_json::from_str(raw).unwrap();
            assert_eq!(h.value, None, "input: {raw}");
        }
    }

    #[test]
    fn known_value_is_trimmed() {
        let h: Holder = serde_json::from_str(r#"{"value":"  Punctures  "}"#).unwrap();
        assert_eq!(h.value.as_deref(), Some("Punctures"));
    }

    #[test]
    fn is_unknown_matches_case_insensitively() {
        assert!(super::is_unknown("unKnown"));
        assert!(!super::is_unknown("Unknown Road Garage"));
    }
}
