//! # ThingSpeak Client
//!
//! A Rust client library for the ThingSpeak IoT data platform's REST API.
//!
//! ## Features
//!
//! - Account client for listing the channels an API key owns
//! - Channel client for writing feed entries and reading feeds, fields,
//!   last entries, status updates and single entries
//! - Read responses decoded into ordered JSON values, with `null` samples
//!   surfaced as the string `"NaN"`
//! - API key persistence in a plain-text key file
//! - Async clients on tokio, plus blocking wrappers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thingspeak_client::rest::ChannelClient;
//! use thingspeak_client::types::Parameters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChannelClient::builder("https://api.thingspeak.com")
//!         .api_key("READ_KEY")
//!         .channel_id(9u32)
//!         .build()?;
//!     let last = client.get_last_entry("", &Parameters::new()).await?;
//!     println!("Last entry: {}", last);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod blocking;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::ThingSpeakError;
pub use rest::{AccountClient, ChannelClient, ChannelConfig, FieldSelector};
pub use types::{NAN_SENTINEL, NormalizedResponse, Parameters};

/// Result type alias using ThingSpeakError
pub type Result<T> = std::result::Result<T, ThingSpeakError>;
