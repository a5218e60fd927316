//! Reqwest-backed HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;
use tracing::debug;

use super::{HttpClient, TransportError};
use crate::config::{ConfigManager, LICENSE_KEY_HEADER};
use crate::error::{Result, SdkError};

// == Reqwest Client ==
/// [`HttpClient`] over `reqwest`.
///
/// The license key is read from the [`ConfigManager`] on every request, so a
/// key rotated after construction takes effect immediately.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    config: ConfigManager,
}

impl ReqwestClient {
    pub fn new(config: ConfigManager, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent(concat!("catalog-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SdkError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn with_license_key(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.config.snapshot().license_key;
        if key.is_empty() {
            return request;
        }
        request.header(LICENSE_KEY_HEADER, key)
    }

    async fn execute(&self, request: RequestBuilder) -> std::result::Result<Value, TransportError> {
        let response = self
            .with_license_key(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Self::handle(response).await
    }

    async fn handle(response: Response) -> std::result::Result<Value, TransportError> {
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "catalog api response");
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: Url) -> std::result::Result<Value, TransportError> {
        self.execute(self.client.get(url)).await
    }

    async fn post(&self, url: Url, body: Value) -> std::result::Result<Value, TransportError> {
        self.execute(self.client.post(url).json(&body)).await
    }
}
