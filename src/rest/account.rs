//! Account-level client.

use std::time::Duration;

use crate::auth::ApiKey;
use crate::error::ThingSpeakError;
use crate::rest::endpoints::{CHANNELS, THINGSPEAK_BASE_URL, normalize_host};
use crate::rest::executor::{RequestExecutor, TransportConfig};
use crate::types::{NormalizedResponse, Parameters};

/// Client for account-level endpoints, authenticated with the account API key.
///
/// # Example
///
/// ```rust,no_run
/// use thingspeak_client::rest::AccountClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AccountClient::new("https://api.thingspeak.com", "ACCOUNT_KEY");
///     let channels = client.list_channels().await?;
///     println!("{:#}", channels);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AccountClient {
    executor: RequestExecutor,
    host: String,
}

impl AccountClient {
    /// Create a client for `host` with default transport settings.
    pub fn new(host: impl AsRef<str>, api_key: impl Into<ApiKey>) -> Self {
        Self::builder(api_key).host(host.as_ref()).build()
    }

    /// Create a new client builder.
    pub fn builder(api_key: impl Into<ApiKey>) -> AccountClientBuilder {
        AccountClientBuilder::new(api_key.into())
    }

    /// Host address, always ending in `/`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The shared request executor.
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// List the channels owned by the account.
    ///
    /// Only the account key is sent.
    pub async fn list_channels(&self) -> Result<NormalizedResponse, ThingSpeakError> {
        let url = format!("{}{}", self.host, CHANNELS);
        self.executor.execute_get(&url, &Parameters::new()).await
    }
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("host", &self.host)
            .finish()
    }
}

/// Builder for [`AccountClient`].
pub struct AccountClientBuilder {
    host: String,
    api_key: ApiKey,
    transport: TransportConfig,
}

impl AccountClientBuilder {
    /// Create a new builder for the hosted service.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            host: THINGSPEAK_BASE_URL.to_string(),
            api_key,
            transport: TransportConfig::default(),
        }
    }

    /// Set the host address (a self-hosted server or a mock server).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
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
    pub fn build(self) -> AccountClient {
        AccountClient {
            executor: self.transport.build_executor(self.api_key),
            host: normalize_host(&self.host),
        }
    }
}
