//! HTTP Module
//!
//! The transport seam used by the resource services.
//!
//! # Implementations
//! - [`ReqwestClient`] - real client, attaches the license key header
//! - [`MockHttpClient`] - scripted responses for tests

mod client;
mod mock;

pub use client::ReqwestClient;
pub use mock::{MockHttpClient, RecordedRequest};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;
use thiserror::Error;

// == Transport Error ==
/// Failure reported by an [`HttpClient`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// A response arrived with a non-success status
    #[error("status {0}")]
    Status(u16),

    /// No response arrived
    #[error("network failure: {0}")]
    Network(String),

    /// A success response whose body is not JSON
    #[error("undecodable body: {0}")]
    Decode(String),
}

// == HTTP Client ==
/// JSON-over-HTTP transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: Url) -> Result<Value, TransportError>;

    async fn post(&self, url: Url, body: Value) -> Result<Value, TransportError>;
}

// == Request ==
/// A request a service wants to issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get(Url),
    Post(Url, Value),
}

impl Request {
    pub fn method(&self) -> Method {
        match self {
            Request::Get(_) => Method::GET,
            Request::Post(..) => Method::POST,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            Request::Get(url) | Request::Post(url, _) => url,
        }
    }

    /// Sends the request through `client`.
    pub async fn send(self, client: &dyn HttpClient) -> Result<Value, TransportError> {
        match self {
            Request::Get(url) => client.get(url).await,
            Request::Post(url, body) => client.post(url, body).await,
        }
    }
}
