//! Authentication module for the ThingSpeak API.
//!
//! This module provides:
//! - API key management with secure secret storage
//! - A plain-text key-store file for persisting a channel key
//! - Key resolution for channel clients

mod credentials;
mod key_store;

pub use credentials::ApiKey;
pub use key_store::{KeyStore, resolve_api_key};
