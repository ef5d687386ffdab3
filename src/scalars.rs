//! Custom decoders for the Automox console's non-standard wire scalars.
//!
//! The console encodes two kinds of values that stock serde/chrono reject:
//!
//! - **Quoted integers** — numeric fields such as `uptime` arrive either as
//!   a bare JSON number or as a base-10 string (`"42"`). [`quoted_i64`]
//!   accepts both.
//! - **Offset-without-colon timestamps** — timestamps are rendered as
//!   `2022-07-21T10:10:06+0000`, which RFC 3339 parsers reject because the
//!   UTC offset lacks a colon. [`automox_time`] parses the console's layout
//!   and normalizes to UTC. The console also sends `null`, the literal
//!   string `"null"`, and `""` for absent times; all three decode to `None`
//!   without error. Malformed input is a decode error — callers get a
//!   `Result`, never a silently substituted zero timestamp.
//!
//! Both are `deserialize_with` helpers, applied per field:
//!
//! ```ignore
//! #[serde(default, deserialize_with = "scalars::quoted_i64")]
//! pub uptime: i64,
//! #[serde(default, deserialize_with = "scalars::automox_time")]
//! pub create_time: Option<DateTime<Utc>>,
//! ```

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// Timestamp layout used by the Automox console. `%z` matches the
/// colon-less UTC offset (`+0000`) the console emits.
pub(crate) const AUTOMOX_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Deserializes a signed 64-bit integer that may arrive quoted.
///
/// Accepts a JSON number (`42`) or a base-10 string (`"42"`). Anything
/// else — a non-numeric string, a float, a boolean — is a decode error.
pub fn quoted_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct QuotedI64Visitor;

    impl Visitor<'_> for QuotedI64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer or a base-10 string")
        }

        fn visit_i64<E>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::custom(format!("integer out of range: {v}")))
        }

        fn visit_str<E>(self, v: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            v.parse::<i64>()
                .map_err(|_| E::custom(format!("invalid integer string: {v:?}")))
        }
    }

    deserializer.deserialize_any(QuotedI64Visitor)
}

/// Deserializes an optional timestamp in the console's colon-less offset
/// layout, normalized to UTC.
///
/// `null`, the literal string `"null"`, and the empty string all decode to
/// `None`. A string that does not match the layout is a decode error and
/// fails the surrounding record — the caller decides how to handle it,
/// rather than receiving an ambiguous zero-value time.
pub fn automox_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("null") => Ok(None),
        Some(s) => DateTime::parse_from_str(s, AUTOMOX_TIME_FORMAT)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|e| de::Error::custom(format!("invalid timestamp {s:?}: {e}"))),
    }
}
