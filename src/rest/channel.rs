//! Channel-level client: feed writes and reads for one channel.

use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::auth::{ApiKey, resolve_api_key};
use crate::error::ThingSpeakError;
use crate::rest::endpoints::{self, ChannelId, FieldSelector, THINGSPEAK_BASE_URL, UPDATE};
use crate::rest::executor::{RequestExecutor, TransportConfig};
use crate::types::{NormalizedResponse, Parameters};

/// Options a channel client is constructed from.
///
/// The key is taken from `api_key` if set (and saved to `file` when that is
/// set too), otherwise read from `file`. One of the two is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelConfig {
    /// Channel key: the write key for updates, a read key for private reads.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Key-store file to persist the key to, or to read it from.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Channel id, needed by every read endpoint.
    #[serde(default)]
    pub ch_id: Option<ChannelId>,
}

/// The ThingSpeak channel client.
///
/// # Example
///
/// ```rust,no_run
/// use thingspeak_client::rest::ChannelClient;
/// use thingspeak_client::types::Parameters;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ChannelClient::builder("https://api.thingspeak.com")
///         .api_key("WRITE_KEY")
///         .channel_id(12397u32)
///         .build()?;
///
///     let response = client
///         .update_channel(&Parameters::new().with("field1", "23.5"))
///         .await?;
///     println!("update status: {}", response.status());
///
///     let feed = client
///         .get_channel_feed(&Parameters::new().with("results", 2))
///         .await?;
///     println!("{:#}", feed);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ChannelClient {
    executor: RequestExecutor,
    host: String,
    channel_id: Option<ChannelId>,
}

impl ChannelClient {
    /// Create a client from a host address and a [`ChannelConfig`].
    pub fn new(host: impl Into<String>, config: ChannelConfig) -> Result<Self, ThingSpeakError> {
        Self::builder(host).config(config).build()
    }

    /// Create a new client builder.
    pub fn builder(host: impl Into<String>) -> ChannelClientBuilder {
        ChannelClientBuilder::new(host)
    }

    /// Host address, always ending in `/`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The channel id, if configured.
    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    /// The channel key.
    pub fn api_key(&self) -> &ApiKey {
        self.executor.api_key()
    }

    /// The shared request executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    fn require_channel(&self, operation: &str) -> Result<&ChannelId, ThingSpeakError> {
        self.channel_id.as_ref().ok_or_else(|| {
            ThingSpeakError::Configuration(format!("{} requires a channel id", operation))
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// Write one feed entry.
    ///
    /// Accepts `field1`..`field8`, `lat`, `long`, `elevation`, `status`,
    /// `twitter`, `tweet` and `created_at`. The raw response is returned:
    /// its body is the new entry id, or `0` when the service rejected the update.
    pub async fn update_channel(
        &self,
        params: &Parameters,
    ) -> Result<reqwest::Response, ThingSpeakError> {
        self.executor.execute_post(&self.url(UPDATE), params).await
    }

    /// Read the channel feed.
    ///
    /// See [`FeedRequest`](crate::rest::FeedRequest) for the accepted filters.
    pub async fn get_channel_feed(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let channel = self.require_channel("get_channel_feed")?;
        self.executor
            .execute_get(&self.url(&endpoints::channel_feed(channel)), params)
            .await
    }

    /// Read the feed of one field, or of every field for [`FieldSelector::All`].
    ///
    /// `""`, `None` and `0` select every field.
    pub async fn get_channel_field_feed(
        &self,
        field: impl Into<FieldSelector>,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let channel = self.require_channel("get_channel_field_feed")?;
        let path = endpoints::field_feed(channel, &field.into());
        self.executor.execute_get(&self.url(&path), params).await
    }

    /// Read the last entry of the channel, or of a single field.
    pub async fn get_last_entry(
        &self,
        field: impl Into<FieldSelector>,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let channel = self.require_channel("get_last_entry")?;
        let path = endpoints::last_entry(channel, &field.into());
        self.executor.execute_get(&self.url(&path), params).await
    }

    /// Read the channel's status updates.
    pub async fn get_status_update(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let channel = self.require_channel("get_status_update")?;
        self.executor
            .execute_get(&self.url(&endpoints::status(channel)), params)
            .await
    }

    /// Read one entry by id.
    pub async fn get_specific_entry(
        &self,
        entry_id: impl Display,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let channel = self.require_channel("get_specific_entry")?;
        let entry_id = entry_id.to_string();
        if entry_id.is_empty() {
            return Err(ThingSpeakError::InvalidParameters(
                "entry id must not be empty".to_string(),
            ));
        }
        let path = endpoints::entry(channel, &entry_id);
        self.executor.execute_get(&self.url(&path), params).await
    }
}

impl std::fmt::Debug for ChannelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelClient")
            .field("host", &self.host)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Builder for [`ChannelClient`].
pub struct ChannelClientBuilder {
    host: String,
    config: ChannelConfig,
    transport: TransportConfig,
}

impl ChannelClientBuilder {
    /// Create a new builder for `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            config: ChannelConfig::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Create a new builder for the hosted service.
    pub fn hosted() -> Self {
        Self::new(THINGSPEAK_BASE_URL)
    }

    /// Replace all channel options at once.
    pub fn config(mut self, config: ChannelConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the channel key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set the key-store file.
    pub fn key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(path.into());
        self
    }

    /// Set the channel id.
    pub fn channel_id(mut self, channel_id: impl Into<ChannelId>) -> Self {
        self.config.ch_id = Some(channel_id.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }

    /// Retry transient failures up to `retries` times. Defaults to no retries.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.transport.max_retries = retries;
        self
    }

    /// Build the client.
    ///
    /// Fails when no key is given and none can be read from the key-store file.
    pub fn build(self) -> Result<ChannelClient, ThingSpeakError> {
        let ChannelConfig {
            api_key,
            file,
            ch_id,
        } = self.config;
        let api_key = resolve_api_key(api_key.map(ApiKey::new), file.as_deref())?;

        Ok(ChannelClient {
            executor: self.transport.build_executor(api_key),
            host: endpoints::normalize_host(&self.host),
            channel_id: ch_id,
        })
    }
}
