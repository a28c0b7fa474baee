//! Custom serde helpers for ThingSpeak's wire formats.
//!
//! Response models are read from normalized responses, where a `null` has
//! already become the string `"NaN"`. These helpers fold that placeholder
//! back into `None` and cope with numbers the service sends either bare or
//! quoted.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::PrimitiveDateTime;
use time::macros::format_description;

use crate::types::normalize::NAN_SENTINEL;

/// Deserialize an optional string, mapping `"NaN"`, `""` and `null` to `None`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use thingspeak_client::types::serde_helpers::nan_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Entry {
///     #[serde(deserialize_with = "nan_as_none::deserialize", default)]
///     field1: Option<String>,
/// }
///
/// let entry: Entry = serde_json::from_str(r#"{"field1":"NaN"}"#).unwrap();
/// assert!(entry.field1.is_none());
///
/// let entry: Entry = serde_json::from_str(r#"{"field1":"21.4"}"#).unwrap();
/// assert_eq!(entry.field1.as_deref(), Some("21.4"));
/// ```
pub mod nan_as_none {
    use super::*;

    /// Deserialize a string, returning None for the placeholder.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty() && s != NAN_SENTINEL))
    }
}

/// Deserialize an optional number that may arrive bare, quoted, `"NaN"` or `null`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use thingspeak_client::types::serde_helpers::nan_or_number;
///
/// #[derive(Deserialize, Debug)]
/// struct Channel {
///     #[serde(deserialize_with = "nan_or_number::deserialize", default)]
///     last_entry_id: Option<u64>,
/// }
///
/// let channel: Channel = serde_json::from_str(r#"{"last_entry_id":12}"#).unwrap();
/// assert_eq!(channel.last_entry_id, Some(12));
///
/// let channel: Channel = serde_json::from_str(r#"{"last_entry_id":"12"}"#).unwrap();
/// assert_eq!(channel.last_entry_id, Some(12));
///
/// let channel: Channel = serde_json::from_str(r#"{"last_entry_id":"NaN"}"#).unwrap();
/// assert!(channel.last_entry_id.is_none());
/// ```
pub mod nan_or_number {
    use super::*;

    /// Deserialize a value that may be a number, a numeric string or the placeholder.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        struct NanOrNumberVisitor<T>(PhantomData<T>);

        impl<T> NanOrNumberVisitor<T>
        where
            T: FromStr,
            T::Err: Display,
        {
            fn parse<E: de::Error>(v: &str) -> Result<Option<T>, E> {
                v.parse().map(Some).map_err(de::Error::custom)
            }
        }

        impl<'de, T> de::Visitor<'de> for NanOrNumberVisitor<T>
        where
            T: FromStr,
            T::Err: Display,
        {
            type Value = Option<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, a numeric string, \"NaN\" or null")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Self::parse(&v.to_string())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Self::parse(&v.to_string())
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Self::parse(&v.to_string())
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let v = v.trim();
                if v.is_empty() || v == NAN_SENTINEL {
                    Ok(None)
                } else {
                    Self::parse(v)
                }
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }
        }

        deserializer.deserialize_any(NanOrNumberVisitor(PhantomData))
    }
}

/// Serialize a type using its Display implementation.
///
/// Used for request options the service takes as free-form text, such as
/// aggregation windows that are either a minute count or `daily`.
pub mod display {
    use super::*;

    /// Serialize using Display trait.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
}

fn format_feed_datetime(value: &PrimitiveDateTime) -> Result<String, time::error::Format> {
    value.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
}

fn parse_feed_datetime(text: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
}

/// Serialize a `time::PrimitiveDateTime` as `YYYY-MM-DD HH:MM:SS`.
///
/// This is the format feed filters (`start`, `end`) and `created_at` on
/// updates are given in. The time zone is set separately through the
/// `timezone` or `offset` options.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use time::macros::datetime;
/// use thingspeak_client::types::serde_helpers::feed_datetime;
///
/// #[derive(Serialize)]
/// struct Request {
///     #[serde(with = "feed_datetime::option", skip_serializing_if = "Option::is_none")]
///     start: Option<time::PrimitiveDateTime>,
/// }
///
/// let request = Request { start: Some(datetime!(2014-12-31 23:59:59)) };
/// let json = serde_json::to_string(&request).unwrap();
/// assert_eq!(json, r#"{"start":"2014-12-31 23:59:59"}"#);
/// ```
pub mod feed_datetime {
    use super::*;

    /// Serialize as `YYYY-MM-DD HH:MM:SS`.
    pub fn serialize<S>(value: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = format_feed_datetime(value).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserialize from `YYYY-MM-DD HH:MM:SS`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_feed_datetime(&s).map_err(de::Error::custom)
    }

    /// Optional variant of [`feed_datetime`](super::feed_datetime).
    pub mod option {
        use super::*;

        /// Serialize an optional datetime, or nothing if None.
        pub fn serialize<S>(
            value: &Option<PrimitiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional datetime.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = Option::<String>::deserialize(deserializer)?;
            s.map(|s| parse_feed_datetime(&s).map_err(de::Error::custom))
                .transpose()
        }
    }
}

/// Deserialize an RFC 3339 timestamp such as `2014-02-26T12:43:04-05:00`.
///
/// Feed entries carry their creation time in this form, with the offset of
/// the time zone the request asked for.
pub mod rfc3339 {
    use super::*;
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    /// Deserialize an RFC 3339 string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&s, &Rfc3339).map_err(de::Error::custom)
    }
}
