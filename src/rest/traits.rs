//! Trait definition for the channel operations.
//!
//! This module provides the `ChannelApi` trait which abstracts the channel
//! read and write operations. This enables:
//! - Mock implementations for testing code that logs sensor data
//! - Decorator pattern (e.g., a wrapper that spaces out updates)
//!
//! # Example
//!
//! ```rust,ignore
//! use thingspeak_client::rest::ChannelApi;
//! use thingspeak_client::types::Parameters;
//!
//! async fn log_temperature<C: ChannelApi>(client: &C, celsius: f64) -> Result<(), thingspeak_client::ThingSpeakError> {
//!     client.update_channel(&Parameters::new().with("field1", celsius)).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::ThingSpeakError;
use crate::rest::ChannelClient;
use crate::rest::endpoints::FieldSelector;
use crate::types::{NormalizedResponse, Parameters};

/// Trait defining the channel operations.
///
/// All methods are async and return `Result<T, ThingSpeakError>`.
pub trait ChannelApi: Send + Sync {
    /// Write one feed entry, returning the raw response.
    fn update_channel(
        &self,
        params: &Parameters,
    ) -> impl Future<Output = Result<reqwest::Response, ThingSpeakError>> + Send;

    /// Read the channel feed.
    fn get_channel_feed(
        &self,
        params: &Parameters,
    ) -> impl Future<Output = Result<NormalizedResponse, ThingSpeakError>> + Send;

    /// Read the feed of one field or of all fields.
    fn get_channel_field_feed(
        &self,
        field: FieldSelector,
        params: &Parameters,
    ) -> impl Future<Output = Result<NormalizedResponse, ThingSpeakError>> + Send;

    /// Read the last entry of the channel or of one field.
    fn get_last_entry(
        &self,
        field: FieldSelector,
        params: &Parameters,
    ) -> impl Future<Output = Result<NormalizedResponse, ThingSpeakError>> + Send;

    /// Read the channel's status updates.
    fn get_status_update(
        &self,
        params: &Parameters,
    ) -> impl Future<Output = Result<NormalizedResponse, ThingSpeakError>> + Send;

    /// Read one entry by id.
    fn get_specific_entry(
        &self,
        entry_id: &str,
        params: &Parameters,
    ) -> impl Future<Output = Result<NormalizedResponse, ThingSpeakError>> + Send;
}

impl ChannelApi for ChannelClient {
    async fn update_channel(
        &self,
        params: &Parameters,
    ) -> Result<reqwest::Response, ThingSpeakError> {
        ChannelClient::update_channel(self, params).await
    }

    async fn get_channel_feed(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        ChannelClient::get_channel_feed(self, params).await
    }

    async fn get_channel_field_feed(
        &self,
        field: FieldSelector,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        ChannelClient::get_channel_field_feed(self, field, params).await
    }

    async fn get_last_entry(
        &self,
        field: FieldSelector,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        ChannelClient::get_last_entry(self, field, params).await
    }

    async fn get_status_update(
        &self,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        ChannelClient::get_status_update(self, params).await
    }

    async fn get_specific_entry(
        &self,
        entry_id: &str,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        ChannelClient::get_specific_entry(self, entry_id, params).await
    }
}
