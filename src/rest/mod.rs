//! ThingSpeak REST API clients.
//!
//! [`AccountClient`] lists the channels of an account. [`ChannelClient`]
//! writes and reads the feed of one channel. Both run requests through a
//! shared [`RequestExecutor`] that merges the client's API key into the
//! parameters and decodes read responses.
//!
//! # Trait-based API
//!
//! The [`ChannelApi`] trait abstracts the channel operations, enabling mock
//! implementations in tests of code that logs to a channel.

mod account;
mod channel;
pub mod endpoints;
mod executor;
mod traits;
pub mod types;

pub use account::{AccountClient, AccountClientBuilder};
pub use channel::{ChannelClient, ChannelClientBuilder, ChannelConfig};
pub use endpoints::{ChannelId, FieldSelector, THINGSPEAK_BASE_URL};
pub use executor::RequestExecutor;
pub use traits::ChannelApi;
pub use types::*;
