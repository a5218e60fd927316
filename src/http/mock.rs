//! Scripted HTTP client for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use super::{HttpClient, TransportError};

/// A request seen by [`MockHttpClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Responses keyed by URL path, query ignored
    routes: HashMap<String, Result<Value, TransportError>>,
    /// When set, every request fails with this error
    failure: Option<TransportError>,
    calls: Vec<RecordedRequest>,
}

// == Mock HTTP Client ==
/// [`HttpClient`] answering from a table of canned responses.
///
/// Clones share state, so a test can keep a handle to inspect calls after
/// giving one to a service. Unrouted paths answer with status 404.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answers requests to `path` with `body`.
    pub fn respond(self, path: &str, body: Value) -> Self {
        self.lock().routes.insert(path.to_string(), Ok(body));
        self
    }

    /// Fails requests to `path` with `error`.
    pub fn fail(self, path: &str, error: TransportError) -> Self {
        self.lock().routes.insert(path.to_string(), Err(error));
        self
    }

    /// Makes every request fail with `error` until [`recover`](Self::recover).
    pub fn fail_all(&self, error: TransportError) {
        self.lock().failure = Some(error);
    }

    pub fn recover(&self) {
        self.lock().failure = None;
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.lock().calls.clone()
    }

    fn answer(&self, method: Method, url: Url, body: Option<Value>) -> Result<Value, TransportError> {
        let mut state = self.lock();
        let path = url.path().to_string();
        state.calls.push(RecordedRequest { method, url, body });

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        state
            .routes
            .get(&path)
            .cloned()
            .unwrap_or(Err(TransportError::Status(404)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: Url) -> Result<Value, TransportError> {
        self.answer(Method::GET, url, None)
    }

    async fn post(&self, url: Url, body: Value) -> Result<Value, TransportError> {
        self.answer(Method::POST, url, Some(body))
    }
}
