//! Configuration Module
//!
//! Loads SDK settings from environment variables and holds the mutable
//! connection state (base URL and license key) shared by every service.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Url;
use tracing::info;

use crate::error::ConfigError;

/// API version path segment the base URL must end with.
pub const API_VERSION: &str = "v2";

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.autoxpert.com.co/v2/";

/// Header carrying the license key.
pub const LICENSE_KEY_HEADER: &str = "X-License-Key";

// == SDK Config ==
/// SDK configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// API root, normalized to end with the version segment
    pub base_url: String,
    /// License key sent with every request (empty = not sent)
    pub license_key: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// TTL in seconds for list, detail and variation reads
    pub cache_ttl: u64,
    /// TTL in seconds for search and SKU filter reads
    pub search_cache_ttl: u64,
    /// Background cleanup interval in seconds, 0 disables the task
    pub cleanup_interval: u64,
}

impl SdkConfig {
    /// Creates a new SdkConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL` - API root (default: `https://api.autoxpert.com.co/v2/`)
    /// - `CATALOG_LICENSE_KEY` - License key (default: empty)
    /// - `CATALOG_REQUEST_TIMEOUT_MS` - Request timeout (default: 10000)
    /// - `CATALOG_CACHE_TTL` - List/detail TTL in seconds (default: 300)
    /// - `CATALOG_SEARCH_CACHE_TTL` - Search/filter TTL in seconds (default: 60)
    /// - `CATALOG_CLEANUP_INTERVAL` - Sweep interval in seconds (default: 0, disabled)
    ///
    /// A set but invalid `CATALOG_BASE_URL` is an error; requests never fall
    /// back to the default host. Unparseable numbers keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = match env::var("CATALOG_BASE_URL") {
            Ok(raw) => normalize_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };
        Ok(Self {
            base_url,
            license_key: env::var("CATALOG_LICENSE_KEY").unwrap_or(defaults.license_key),
            request_timeout_ms: parse_var("CATALOG_REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            cache_ttl: parse_var("CATALOG_CACHE_TTL").unwrap_or(defaults.cache_ttl),
            search_cache_ttl: parse_var("CATALOG_SEARCH_CACHE_TTL")
                .unwrap_or(defaults.search_cache_ttl),
            cleanup_interval: parse_var("CATALOG_CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
        })
    }
}

fn parse_var(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            license_key: String::new(),
            request_timeout_ms: 10_000,
            cache_ttl: 300,
            search_cache_ttl: 60,
            cleanup_interval: 0,
        }
    }
}

// == Base URL Normalization ==
/// Trims the URL and makes it end with `/v2/`.
///
/// `https://host`, `https://host/` and `https://host/v2` all become
/// `https://host/v2/`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }

    let with_version = if trimmed.rsplit('/').next() == Some(API_VERSION) {
        format!("{trimmed}/")
    } else {
        format!("{trimmed}/{API_VERSION}/")
    };

    Url::parse(&with_version).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
    Ok(with_version)
}

// == Config State ==
/// Connection settings read by services at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    pub base_url: String,
    pub license_key: String,
}

// == Config Manager ==
/// Shared, mutable handle over [`ConfigState`].
///
/// Services and the HTTP client hold clones and call
/// [`snapshot`](Self::snapshot) per request, so updates are picked up without
/// rebuilding anything.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    state: Arc<RwLock<ConfigState>>,
}

impl ConfigManager {
    /// Creates a manager after validating and normalizing `base_url`.
    ///
    /// An empty license key is accepted here; the header is simply omitted.
    pub fn new(base_url: &str, license_key: impl Into<String>) -> Result<Self, ConfigError> {
        let state = ConfigState {
            base_url: normalize_base_url(base_url)?,
            license_key: license_key.into(),
        };
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub fn from_config(config: &SdkConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, config.license_key.clone())
    }

    /// Returns a copy of the current settings.
    pub fn snapshot(&self) -> ConfigState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let base = self.snapshot().base_url;
        Url::parse(&base).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))
    }

    pub fn set_base_url(&self, url: &str) -> Result<(), ConfigError> {
        let normalized = normalize_base_url(url)?;
        info!(base_url = %normalized, "base URL updated");
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .base_url = normalized;
        Ok(())
    }

    pub fn set_license_key(&self, key: &str) -> Result<(), ConfigError> {
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyLicenseKey);
        }
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .license_key = key.to_string();
        info!("license key updated");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(ConfigState {
                base_url: DEFAULT_BASE_URL.to_string(),
                license_key: String::new(),
            })),
        }
    }
}
