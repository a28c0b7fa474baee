//! Authenticated request execution shared by the account and channel clients.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use url::Url;

use crate::auth::ApiKey;
use crate::error::ThingSpeakError;
use crate::types::{NormalizedResponse, Parameters, normalize_response};

/// Performs GET and POST requests with the client's API key merged in.
///
/// The key is added to a copy of the caller's parameters only when the caller
/// has not set `api_key` themselves, so one executor can be shared across
/// threads without locking.
#[derive(Clone)]
pub struct RequestExecutor {
    http_client: ClientWithMiddleware,
    api_key: ApiKey,
}

impl RequestExecutor {
    /// Create an executor with default transport settings.
    pub fn new(api_key: ApiKey) -> Self {
        TransportConfig::default().build_executor(api_key)
    }

    /// The key merged into every request.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// GET `url` with `params` as the query string and decode the body.
    ///
    /// A non-success status is an error; the body is only decoded on success.
    pub async fn execute_get(
        &self,
        url: &str,
        params: &Parameters,
    ) -> Result<NormalizedResponse, ThingSpeakError> {
        let params = params.with_api_key(&self.api_key);
        tracing::debug!("HTTP request:");
        tracing::debug!("Query: {}", url);
        tracing::debug!("Parameters: {:?}", params);

        let mut request_url = Url::parse(url)?;
        {
            let mut query_pairs = request_url.query_pairs_mut();
            for (name, value) in params.to_pairs() {
                query_pairs.append_pair(&name, &value);
            }
        }

        let response = self.http_client.get(request_url.as_str()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("{}", body);

        if !status.is_success() {
            return Err(ThingSpeakError::Status { status, body });
        }

        normalize_response(&body)
    }

    /// POST `params` as a form body to `url`.
    ///
    /// The response is handed back untouched; its status is not checked.
    pub async fn execute_post(
        &self,
        url: &str,
        params: &Parameters,
    ) -> Result<reqwest::Response, ThingSpeakError> {
        let params = params.with_api_key(&self.api_key);
        tracing::debug!("HTTP request:");
        tracing::debug!("Query: {}", url);
        tracing::debug!("Parameters: {:?}", params);

        let form_data = params.to_form()?;
        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(form_data)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "update response");
        Ok(response)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("api_key", &self.api_key)
            .finish()
    }
}

/// HTTP transport settings shared by the client builders.
#[derive(Debug, Clone, Default)]
pub(crate) struct TransportConfig {
    pub(crate) user_agent: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) max_retries: u32,
}

impl TransportConfig {
    pub(crate) fn build_executor(&self, api_key: ApiKey) -> RequestExecutor {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("thingspeak-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid user agent, using the default");
            HeaderValue::from_static("thingspeak-client")
        });
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                "failed to build configured HTTP client, falling back to defaults"
            );
            reqwest::Client::new()
        });

        let mut client = ClientBuilder::new(reqwest_client).with(TracingMiddleware::default());
        if self.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(self.max_retries);
            client = client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        RequestExecutor {
            http_client: client.build(),
            api_key,
        }
    }
}
