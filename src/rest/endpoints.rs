//! ThingSpeak REST API endpoint paths.
//!
//! Paths are relative: they are appended to a host address that always ends
//! in exactly one `/` (see [`normalize_host`]).

use std::fmt;

use serde::{Deserialize, Deserializer, de};

/// Base URL for the hosted ThingSpeak REST API.
pub const THINGSPEAK_BASE_URL: &str = "https://api.thingspeak.com/";

/// List the account's channels.
pub const CHANNELS: &str = "channels.json";
/// Write a feed entry.
pub const UPDATE: &str = "update";

/// Make sure a host address ends in a single `/`.
///
/// Idempotent: `"http://example.com/api"` and `"http://example.com/api/"`
/// both become `"http://example.com/api/"`.
pub fn normalize_host(host: &str) -> String {
    format!("{}/", host.trim_end_matches('/'))
}

/// A channel identifier.
///
/// The service uses numeric ids, but any string is passed through as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Create a channel id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as it appears in paths.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

macro_rules! numeric_channel_id {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ChannelId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

numeric_channel_id!(u32, u64, usize, i32);

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChannelIdVisitor;

        impl de::Visitor<'_> for ChannelIdVisitor {
            type Value = ChannelId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a channel id as a string or an integer")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ChannelId::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ChannelId(v.to_string()))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(ChannelId::from(v))
            }
        }

        deserializer.deserialize_any(ChannelIdVisitor)
    }
}

/// Which field of a channel to read.
///
/// An empty id, an absent id and field `0` all mean every field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldSelector {
    /// Every field of the channel.
    #[default]
    All,
    /// A single field.
    Id(String),
}

impl FieldSelector {
    /// The `/{field_id}` path segment, or nothing for [`FieldSelector::All`].
    fn segment(&self) -> String {
        match self {
            Self::All => String::new(),
            Self::Id(id) => format!("/{}", id),
        }
    }
}

impl From<&str> for FieldSelector {
    fn from(id: &str) -> Self {
        if id.is_empty() {
            Self::All
        } else {
            Self::Id(id.to_string())
        }
    }
}

impl From<String> for FieldSelector {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

macro_rules! numeric_field_selector {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldSelector {
                fn from(id: $t) -> Self {
                    if id == 0 {
                        Self::All
                    } else {
                        Self::Id(id.to_string())
                    }
                }
            }
        )*
    };
}

numeric_field_selector!(u8, u16, u32, u64, usize, i32);

impl<T: Into<FieldSelector>> From<Option<T>> for FieldSelector {
    fn from(id: Option<T>) -> Self {
        id.map(Into::into).unwrap_or_default()
    }
}

/// `channels/{ch_id}/feeds.json`
pub fn channel_feed(channel: &ChannelId) -> String {
    format!("channels/{}/feeds.json", channel)
}

/// `channels/{ch_id}/fields[/{field_id}].json`
pub fn field_feed(channel: &ChannelId, field: &FieldSelector) -> String {
    format!("channels/{}/fields{}.json", channel, field.segment())
}

/// `channels/{ch_id}/feeds[/{field_id}]/last.json`
pub fn last_entry(channel: &ChannelId, field: &FieldSelector) -> String {
    format!("channels/{}/feeds{}/last.json", channel, field.segment())
}

/// `channels/{ch_id}/status.json`
pub fn status(channel: &ChannelId) -> String {
    format!("channels/{}/status.json", channel)
}

/// `channels/{ch_id}/feeds/{entry_id}.json`
pub fn entry(channel: &ChannelId, entry_id: &str) -> String {
    format!("channels/{}/feeds/{}.json", channel, entry_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("http://example.com/api"), "http://example.com/api/");
        assert_eq!(normalize_host("http://example.com/api/"), "http://example.com/api/");
        assert_eq!(normalize_host("http://example.com/api//"), "http://example.com/api/");
        let once = normalize_host("http://example.com");
        assert_eq!(normalize_host(&once), once);
    }

    #[test]
    fn test_field_feed_collapses_empty_field() {
        let channel = ChannelId::from(7u32);
        let expected = "channels/7/fields.json";
        assert_eq!(field_feed(&channel, &FieldSelector::from("")), expected);
        assert_eq!(field_feed(&channel, &FieldSelector::from(None::<u8>)), expected);
        assert_eq!(field_feed(&channel, &FieldSelector::All), expected);
        assert_eq!(field_feed(&channel, &FieldSelector::from(0u8)), expected);
    }

    #[test]
    fn test_field_feed_with_field() {
        let channel = ChannelId::from(7u32);
        assert_eq!(field_feed(&channel, &3u8.into()), "channels/7/fields/3.json");
        assert_eq!(field_feed(&channel, &"3".into()), "channels/7/fields/3.json");
        assert_eq!(field_feed(&channel, &Some(3u32).into()), "channels/7/fields/3.json");
    }

    #[test]
    fn test_last_entry_paths() {
        let channel = ChannelId::from("12397");
        assert_eq!(last_entry(&channel, &FieldSelector::All), "channels/12397/feeds/last.json");
        assert_eq!(last_entry(&channel, &2u8.into()), "channels/12397/feeds/2/last.json");
    }

    #[test]
    fn test_fixed_paths() {
        let channel = ChannelId::from(42u64);
        assert_eq!(channel_feed(&channel), "channels/42/feeds.json");
        assert_eq!(status(&channel), "channels/42/status.json");
        assert_eq!(entry(&channel, "1001"), "channels/42/feeds/1001.json");
    }

    #[test]
    fn test_channel_id_from_string_or_integer() {
        let from_int: ChannelId = serde_json::from_str("12397").unwrap();
        let from_str: ChannelId = serde_json::from_str(r#""12397""#).unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.as_str(), "12397");
    }

    #[test]
    fn test_channel_id_from_any_integer() {
        assert_eq!(ChannelId::from(7), ChannelId::from("7"));
        assert_eq!(ChannelId::from(7usize), ChannelId::from(7u32));
        assert_eq!(ChannelId::from(12397u64).as_str(), "12397");
    }
}
