//! Request and response types for the channel endpoints.
//!
//! Requests are flattened into [`Parameters`](crate::types::Parameters) with
//! [`Parameters::from_request`](crate::types::Parameters::from_request).
//! Responses can be read from a
//! [`NormalizedResponse`](crate::types::NormalizedResponse) with
//! `from_response`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::ThingSpeakError;
use crate::types::NormalizedResponse;
use crate::types::serde_helpers::{display, feed_datetime, nan_as_none, nan_or_number, rfc3339};

/// Aggregation window for feed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Window length in minutes (the service accepts 10, 15, 20, 30, 60, 240, 720, 1440)
    Minutes(u32),
    /// One window per day
    Daily,
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minutes(m) => write!(f, "{}", m),
            Self::Daily => f.write_str("daily"),
        }
    }
}

fn serialize_aggregation<S>(value: &Option<Aggregation>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(window) => display::serialize(window, serializer),
        None => serializer.serialize_none(),
    }
}

/// Options for reading a channel feed or a field feed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedRequest {
    /// Number of entries to retrieve (the service caps this at 8000).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<u32>,
    /// Number of 24-hour periods before now to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    /// Number of 60-second periods before now to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    /// Start of the time range.
    #[serde(with = "feed_datetime::option", skip_serializing_if = "Option::is_none")]
    pub start: Option<PrimitiveDateTime>,
    /// End of the time range.
    #[serde(with = "feed_datetime::option", skip_serializing_if = "Option::is_none")]
    pub end: Option<PrimitiveDateTime>,
    /// Time zone identifier for the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Time zone offset in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    /// Include status updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// Include the channel's metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<bool>,
    /// Include latitude, longitude and elevation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<bool>,
    /// Minimum value to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    /// Maximum value to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    /// Round to this many decimal places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    /// First value in each window.
    #[serde(
        serialize_with = "serialize_aggregation",
        skip_serializing_if = "Option::is_none"
    )]
    pub timescale: Option<Aggregation>,
    /// Sum over each window.
    #[serde(
        serialize_with = "serialize_aggregation",
        skip_serializing_if = "Option::is_none"
    )]
    pub sum: Option<Aggregation>,
    /// Average over each window.
    #[serde(
        serialize_with = "serialize_aggregation",
        skip_serializing_if = "Option::is_none"
    )]
    pub average: Option<Aggregation>,
    /// Median over each window.
    #[serde(
        serialize_with = "serialize_aggregation",
        skip_serializing_if = "Option::is_none"
    )]
    pub median: Option<Aggregation>,
    /// JSONP callback name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

impl FeedRequest {
    /// Create an empty request (service defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of entries.
    pub fn results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }

    /// Read the last `days` days.
    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    /// Restrict to a time range.
    pub fn range(mut self, start: PrimitiveDateTime, end: PrimitiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set the time zone identifier.
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Average over windows of the given length.
    pub fn average(mut self, window: Aggregation) -> Self {
        self.average = Some(window);
        self
    }

    /// Round values to `places` decimals.
    pub fn round(mut self, places: u32) -> Self {
        self.round = Some(places);
        self
    }
}

/// Options for reading the last entry of a channel or field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LastEntryRequest {
    /// Time zone identifier for the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Time zone offset in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    /// Include the status update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// Include latitude, longitude and elevation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<bool>,
    /// JSONP callback name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// Text to add before the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepend: Option<String>,
    /// Text to add after the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
}

/// Options for reading status updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusRequest {
    /// Time zone identifier for the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Time zone offset in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    /// JSONP callback name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

/// Options for reading a single entry by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryRequest {
    /// Time zone identifier for the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Time zone offset in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
    /// Include the status update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// Include latitude, longitude and elevation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<bool>,
    /// JSONP callback name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

/// A single feed entry to write.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRequest {
    /// Value of field 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field1: Option<String>,
    /// Value of field 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field2: Option<String>,
    /// Value of field 3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field3: Option<String>,
    /// Value of field 4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field4: Option<String>,
    /// Value of field 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field5: Option<String>,
    /// Value of field 6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field6: Option<String>,
    /// Value of field 7.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field7: Option<String>,
    /// Value of field 8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field8: Option<String>,
    /// Latitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Decimal>,
    /// Longitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<Decimal>,
    /// Elevation in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,
    /// Status update message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Twitter username linked to ThingTweet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Twitter status update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<String>,
    /// Time the entry was created, in the request's time zone.
    #[serde(with = "feed_datetime::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<PrimitiveDateTime>,
}

impl UpdateRequest {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set field `n` (1 to 8). Other indices are ignored.
    pub fn field(mut self, n: u8, value: impl ToString) -> Self {
        let value = Some(value.to_string());
        match n {
            1 => self.field1 = value,
            2 => self.field2 = value,
            3 => self.field3 = value,
            4 => self.field4 = value,
            5 => self.field5 = value,
            6 => self.field6 = value,
            7 => self.field7 = value,
            8 => self.field8 = value,
            _ => tracing::warn!(field = n, "ignoring out-of-range field index"),
        }
        self
    }

    /// Set the location.
    pub fn location(mut self, lat: Decimal, long: Decimal) -> Self {
        self.lat = Some(lat);
        self.long = Some(long);
        self
    }

    /// Set the status message.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Backdate the entry.
    pub fn created_at(mut self, at: PrimitiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// A channel feed: the channel description plus its entries.
///
/// Returned by the feed, field feed and status endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelFeed {
    /// The channel.
    pub channel: ChannelInfo,
    /// Entries, oldest first.
    #[serde(default)]
    pub feeds: Vec<FeedEntry>,
}

impl ChannelFeed {
    /// Read a feed out of a normalized response.
    pub fn from_response(response: NormalizedResponse) -> Result<Self, ThingSpeakError> {
        Ok(serde_json::from_value(response)?)
    }
}

/// Channel description as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfo {
    /// Channel id. The status endpoint leaves it out.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub id: Option<u64>,
    /// Channel name.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub name: Option<String>,
    /// Channel description.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub description: Option<String>,
    /// Latitude in degrees.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub longitude: Option<Decimal>,
    /// Elevation in meters.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub elevation: Option<Decimal>,
    /// Name of field 1.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field1: Option<String>,
    /// Name of field 2.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field2: Option<String>,
    /// Name of field 3.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field3: Option<String>,
    /// Name of field 4.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field4: Option<String>,
    /// Name of field 5.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field5: Option<String>,
    /// Name of field 6.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field6: Option<String>,
    /// Name of field 7.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field7: Option<String>,
    /// Name of field 8.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field8: Option<String>,
    /// Creation time, as sent.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub created_at: Option<String>,
    /// Time of the last change, as sent.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub updated_at: Option<String>,
    /// Id of the most recent entry.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub last_entry_id: Option<u64>,
    /// Whether the channel is public. Only present in account listings.
    #[serde(default)]
    pub public_flag: Option<bool>,
    /// Channel keys. Only present in account listings.
    #[serde(default)]
    pub api_keys: Vec<ChannelApiKey>,
    /// Channel tags. Only present in account listings.
    #[serde(default)]
    pub tags: Vec<ChannelTag>,
}

impl ChannelInfo {
    /// Read the account's channel listing out of a normalized response.
    pub fn list_from_response(response: NormalizedResponse) -> Result<Vec<Self>, ThingSpeakError> {
        Ok(serde_json::from_value(response)?)
    }

    /// Name of field `n` (1 to 8).
    pub fn field_name(&self, n: u8) -> Option<&str> {
        match n {
            1 => self.field1.as_deref(),
            2 => self.field2.as_deref(),
            3 => self.field3.as_deref(),
            4 => self.field4.as_deref(),
            5 => self.field5.as_deref(),
            6 => self.field6.as_deref(),
            7 => self.field7.as_deref(),
            8 => self.field8.as_deref(),
            _ => None,
        }
    }

    /// The channel's write key, if the listing included it.
    pub fn write_key(&self) -> Option<&str> {
        self.api_keys
            .iter()
            .find(|k| k.write_flag)
            .map(|k| k.api_key.as_str())
    }
}

/// A key attached to a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelApiKey {
    /// The key.
    pub api_key: String,
    /// True for the write key, false for read keys.
    pub write_flag: bool,
}

/// A tag attached to a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelTag {
    /// Tag id.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub id: Option<u64>,
    /// Tag text.
    pub name: String,
}

/// One feed entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    /// When the entry was written.
    #[serde(deserialize_with = "rfc3339::deserialize")]
    pub created_at: OffsetDateTime,
    /// Entry id, unique within the channel.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub entry_id: Option<u64>,
    /// Value of field 1.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field1: Option<String>,
    /// Value of field 2.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field2: Option<String>,
    /// Value of field 3.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field3: Option<String>,
    /// Value of field 4.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field4: Option<String>,
    /// Value of field 5.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field5: Option<String>,
    /// Value of field 6.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field6: Option<String>,
    /// Value of field 7.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field7: Option<String>,
    /// Value of field 8.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub field8: Option<String>,
    /// Latitude in degrees.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub longitude: Option<Decimal>,
    /// Elevation in meters.
    #[serde(deserialize_with = "nan_or_number::deserialize", default)]
    pub elevation: Option<Decimal>,
    /// Status message.
    #[serde(deserialize_with = "nan_as_none::deserialize", default)]
    pub status: Option<String>,
}

impl FeedEntry {
    /// Read a single entry (last entry or entry by id) out of a normalized response.
    pub fn from_response(response: NormalizedResponse) -> Result<Self, ThingSpeakError> {
        Ok(serde_json::from_value(response)?)
    }

    /// Raw value of field `n` (1 to 8), `None` if missing.
    pub fn field(&self, n: u8) -> Option<&str> {
        match n {
            1 => self.field1.as_deref(),
            2 => self.field2.as_deref(),
            3 => self.field3.as_deref(),
            4 => self.field4.as_deref(),
            5 => self.field5.as_deref(),
            6 => self.field6.as_deref(),
            7 => self.field7.as_deref(),
            8 => self.field8.as_deref(),
            _ => None,
        }
    }

    /// Value of field `n` parsed as a decimal.
    ///
    /// `None` when the field is missing or not numeric.
    pub fn field_decimal(&self, n: u8) -> Option<Decimal> {
        self.field(n).and_then(|v| v.trim().parse().ok())
    }
}
