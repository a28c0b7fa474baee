//! Blocking wrappers around the async clients.
//!
//! Each wrapper owns a current-thread tokio runtime and drives one request to
//! completion per call. They must not be used from inside an async runtime;
//! use the clients in [`crate::rest`] there instead.
//!
//! ```rust,no_run
//! use thingspeak_client::blocking::ChannelClient;
//! use thingspeak_client::rest::ChannelConfig;
//! use thingspeak_client::types::Parameters;
//!
//! fn main() -> Result<(), thingspeak_client::ThingSpeakError> {
//!     let config = ChannelConfig {
//!         api_key: Some("WRITE_KEY".to_string()),
//!         ch_id: Some(12397u32.into()),
//!         ..ChannelConfig::default()
//!     };
//!     let client = ChannelClient::new("https://api.thingspeak.com", config)?;
//!     let response = client.update_channel(&Parameters::new().with("field1", 23.5))?;
//!     println!("new entry: {:?}", response.entry_id());
//!     Ok(())
//! }
//! ```

use std::fmt::Display;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tokio::runtime::{Builder, Runtime};

use crate::auth::ApiKey;
use crate::error::ThingSpeakError;
use crate::rest::{self, ChannelConfig, ChannelId, FieldSelector};
use crate::types::{NormalizedResponse, Parameters};

fn current_thread_runtime() -> Result<Runtime, ThingSpeakError> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}

/// A write response with its body read, but not decoded.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body text.
    pub body: String,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> Result<Self, ThingSpeakError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Id of the entry an update created.
    ///
    /// The service answers an update with the new entry id, or `0` when it
    /// refused the write (bad key, or updating too often).
    pub fn entry_id(&self) -> Option<u64> {
        if !self.status.is_success() {
            return None;
        }
        self.body.trim().parse().ok().filter(|id| *id != 0)
    }
}

/// Blocking version of [`rest::AccountClient`].
pub struct AccountClient {
    inner: rest::AccountClient,
    runtime: Runtime,
}

impl AccountClient {
    /// Create a client for `host` with default transport settings.
    pub fn new(host: impl AsRef<str>, api_key: impl Into<ApiKey>) -> Result<Self, ThingSpeakError> {
        Self::from_async(rest::AccountClient::new(host, api_key))
    }

    /// Wrap an async client built with [`rest::AccountClient::builder`].
    pub fn from_async(inner: rest::AccountClient) -> Result<Self, ThingSpeakError> {
        Ok(Self {
            inner,
            runtime: current_thread_runtime()?,
        })
    }

    /// Host address, always ending in `/`.
    pub fn host(&self) -> &str {
        self.inner.host()
    }

    /// List the channels owned by the account.
    pub fn list_channels(&self) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime.block_on(self.inner.list_channels())
    }
}

/// Blocking version of [`rest::ChannelClient`].
pub struct ChannelClient {
    inner: rest::ChannelClient,
    runtime: Runtime,
}

impl ChannelClient {
    /// Create a client from a host address and a [`ChannelConfig`].
    pub fn new(host: impl Into<String>, config: ChannelConfig) -> Result<Self, ThingSpeakError> {
        Self::from_async(rest::ChannelClient::new(host, config)?)
    }

    /// Wrap an async client built with [`rest::ChannelClient::builder`].
    pub fn from_async(inner: rest::ChannelClient) -> Result<Self, ThingSpeakError> {
        Ok(Self {
            inner,
            runtime: current_thread_runtime()?,
        })
    }

    /// Host address, always ending in `/`.
    pub fn host(&self) -> &str {
        self.inner.host()
    }

    /// The channel id, if configured.
    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.inner.channel_id()
    }

    /// The channel key.
    pub fn api_key(&self) -> &ApiKey {
        self.inner.api_key()
    }

    /// Write one feed entry.
    pub fn update_channel(&self, params: &Parameters) -> Result<RawResponse, ThingSpeakError> {
        self.runtime.block_on(async {
            let response = self.inner.update_channel(params).await?;
            RawResponse::read(response).await
        })
    }

    /// Read the channel feed.
    pub fn get_channel_feed(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime.block_on(self.inner.get_channel_feed(params))
    }

    /// Read the feed of one field, or of every field.
    pub fn get_channel_field_feed(
        &self,
        field: impl Into<FieldSelector>,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime
            .block_on(self.inner.get_channel_field_feed(field, params))
    }

    /// Read the last entry of the channel, or of a single field.
    pub fn get_last_entry(
        &self,
        field: impl Into<FieldSelector>,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime.block_on(self.inner.get_last_entry(field, params))
    }

    /// Read the channel's status updates.
    pub fn get_status_update(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime.block_on(self.inner.get_status_update(params))
    }

    /// Read one entry by id.
    pub fn get_specific_entry(
        &self,
        entry_id: impl Display,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        self.runtime
            .block_on(self.inner.get_specific_entry(entry_id, params))
    }
}

impl std::fmt::Debug for ChannelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::ChannelClient")
            .field("inner", &self.inner)
            .finish()
    }
}
