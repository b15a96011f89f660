/*
[INPUT]:  HTTP configuration (base URL, timeouts) and the shared session context
[OUTPUT]: Configured reqwest client, bearer-authorized request builders, classified responses
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing response classification
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::auth::SessionContext;
use crate::http::error::extract_error_message;
use crate::http::{CloudTaskError, Result};
use crate::types::Acknowledgement;

/// Default backend location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the CloudTask API
#[derive(Debug, Clone)]
pub struct CloudTaskClient {
    http_client: Client,
    base_url: Url,
}

impl CloudTaskClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client against an explicit backend
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Backend root every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for a public endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder carrying the session's bearer token
    ///
    /// Fails locally, before any network traffic, when the session has no
    /// usable token.
    pub(crate) fn authorized_request(
        &self,
        method: Method,
        endpoint: &str,
        session: &SessionContext,
    ) -> Result<RequestBuilder> {
        let token = session.bearer_token()?;
        Ok(self.request(method, endpoint)?.bearer_auth(token))
    }

    /// Send a request and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.execute(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(error = %err, "response body did not match expected shape");
            CloudTaskError::InvalidResponse(format!("unexpected response body: {err}"))
        })
    }

    /// Send a request whose success body carries nothing we depend on
    pub(crate) async fn send_ack(&self, builder: RequestBuilder) -> Result<Acknowledgement> {
        let response = self.execute(builder).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Acknowledgement::default());
        }
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| {
            tracing::warn!(error = %err, "request did not complete");
            CloudTaskError::Http(err)
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        if status.is_success() {
            tracing::debug!(path = %url, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        tracing::warn!(path = %url, status = status.as_u16(), message = %message, "request rejected");
        Err(CloudTaskError::from_status(status, message))
    }
}

/// Parse a base URL so that endpoints join beneath its path
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(CloudTaskError::Config("base URL must not be empty".to_string()));
    }
    let mut url = Url::parse(trimmed)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
