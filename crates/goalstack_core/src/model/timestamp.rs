//! Canonical timestamp handling for goal records.
//!
//! # Responsibility
//! - Capture creation/completion instants in UTC.
//! - Define the single on-disk text form used by the store and identity.
//!
//! # Invariants
//! - Captured instants carry at most microsecond precision, so
//!   `parse(format(t)) == t` for every `t` produced by [`now`].
//! - The text form is fixed-width for UTC values and sorts chronologically.

use chrono::{DateTime, ParseError, SubsecRound, Utc};

/// On-disk timestamp layout, e.g. `2026-10-18T09:30:00.123456+0000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

/// Returns the current UTC instant truncated to microseconds.
pub fn now() -> DateTime<Utc> {
    truncate(Utc::now())
}

/// Drops sub-microsecond precision the text form cannot carry.
pub fn truncate(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(6)
}

/// Renders an instant in [`TIMESTAMP_FORMAT`].
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a [`TIMESTAMP_FORMAT`] string; any offset is normalized to UTC.
pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT).map(|instant| instant.with_timezone(&Utc))
}

/// Serde adapter for required timestamps.
pub mod serde_utc {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse(&text)
            .map_err(|err| D::Error::custom(format!("invalid timestamp `{text}`: {err}")))
    }
}

/// Serde adapter for nullable timestamps.
pub mod serde_utc_option {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => serializer.serialize_some(&super::format(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => super::parse(&text)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid timestamp `{text}`: {err}"))),
            None => Ok(None),
        }
    }
}
