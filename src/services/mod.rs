//! Resource Services
//!
//! Typed, cached access to the catalog API.
//!
//! Every read follows the same protocol:
//! 1. Build the cache key from the operation and all its parameters
//! 2. Fresh cache hit: return it, no request is made
//! 3. Miss: issue the request against the current base URL
//! 4. Success: store the payload with the operation's TTL and tags
//! 5. Failure: raise `Server(status)` or `Network`, unless the operation
//!    serves stale data on error and an expired value is kept under the key.
//!    The expired value stays available for the whole outage; it is not
//!    re-stored, so a later successful fetch is still required to refresh it
//!
//! Concurrent misses on the same key are not coalesced; each caller fetches.

mod banners;
mod categories;
mod policy;
mod products;

pub use banners::BannersService;
pub use categories::CategoriesService;
pub use policy::{CachePolicies, CachePolicy};
pub use products::ProductsService;

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheOptions, Lookup};
use crate::config::ConfigManager;
use crate::error::{ConfigError, Result, SdkError};
use crate::http::{HttpClient, Request, TransportError};

// == Cached Read ==
/// Cache coordinates of one read.
#[derive(Debug, Clone)]
pub(crate) struct CachedRead {
    pub key: String,
    pub tags: Vec<String>,
    pub policy: CachePolicy,
}

impl CachedRead {
    pub fn new(key: String, policy: CachePolicy) -> Self {
        Self {
            key,
            tags: Vec::new(),
            policy,
        }
    }

    pub fn tagged<I: IntoIterator<Item = String>>(mut self, tags: I) -> Self {
        self.tags.extend(tags);
        self
    }
}

// == Service Context ==
/// Collaborators shared by every service.
#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub cache: Cache,
    pub config: ConfigManager,
    pub http: Arc<dyn HttpClient>,
}

impl ServiceContext {
    pub fn new(cache: Cache, config: ConfigManager, http: Arc<dyn HttpClient>) -> Self {
        Self {
            cache,
            config,
            http,
        }
    }

    /// Appends `segments` to the base URL current at call time, ending with `/`.
    ///
    /// Each segment is percent-encoded, so an id holding `/`, `?` or `#`
    /// stays inside its segment. Empty, `.` and `..` segments are rejected.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(SdkError::InvalidArgument(format!(
                "path segment {bad:?} is not allowed"
            )));
        }

        let mut url = self.config.base_url()?;
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ConfigError::InvalidBaseUrl("base URL cannot hold a path".to_string())
            })?;
            path.pop_if_empty().extend(segments).push("");
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    // == Read Through ==
    /// Serves `read.key` from the cache or fetches it with `request`.
    ///
    /// The response body is decoded as `R` and narrowed to the cached payload
    /// `T` by `extract`.
    pub async fn read_through<R, T>(
        &self,
        read: CachedRead,
        request: Request,
        extract: impl FnOnce(R) -> T,
    ) -> Result<T>
    where
        R: DeserializeOwned,
        T: Serialize + DeserializeOwned,
    {
        let stale = match self.cache.lookup::<T>(&read.key) {
            Lookup::Fresh(value) => return Ok(value),
            Lookup::Expired(value) => Some(value),
            Lookup::Missing => None,
        };

        debug!(key = %read.key, method = %request.method(), url = %request.url(), "fetching");
        let body = match request.send(self.http.as_ref()).await {
            Ok(body) => body,
            Err(err) => return Self::recover(&read, stale, err),
        };

        let wire: R =
            serde_json::from_value(body).map_err(|e| SdkError::InvalidResponse(e.to_string()))?;
        let value = extract(wire);

        let options = CacheOptions::new(read.policy.ttl_seconds).with_tags(read.tags);
        self.cache.set(&read.key, &value, &options);
        Ok(value)
    }

    fn recover<T>(read: &CachedRead, stale: Option<T>, err: TransportError) -> Result<T> {
        let recoverable = match &err {
            TransportError::Network(_) => true,
            TransportError::Status(status) => *status >= 500,
            TransportError::Decode(_) => false,
        };

        match stale {
            Some(value) if read.policy.stale_on_error && recoverable => {
                warn!(key = %read.key, error = %err, "fetch failed, serving stale cache entry");
                Ok(value)
            }
            _ => Err(err.into()),
        }
    }
}

pub(crate) fn flag(value: bool) -> String {
    value.to_string()
}
