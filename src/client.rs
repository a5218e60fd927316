//! Catalog Client
//!
//! Bundles the three resource services around one cache and one config.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::Cache;
use crate::config::{ConfigManager, SdkConfig};
use crate::error::Result;
use crate::http::{HttpClient, ReqwestClient};
use crate::services::{BannersService, CachePolicies, CategoriesService, ProductsService};

/// Entry point of the SDK.
///
/// All services share the same [`Cache`] and [`ConfigManager`], so a value
/// cached by one is visible to every other holder of the cache handle.
#[derive(Clone)]
pub struct CatalogClient {
    banners: BannersService,
    categories: CategoriesService,
    products: ProductsService,
    cache: Cache,
    config: ConfigManager,
}

impl CatalogClient {
    /// Wires the services from explicit collaborators.
    pub fn new(
        config: ConfigManager,
        cache: Cache,
        http: Arc<dyn HttpClient>,
        policies: CachePolicies,
    ) -> Self {
        Self {
            banners: BannersService::new(cache.clone(), config.clone(), http.clone())
                .with_policies(policies),
            categories: CategoriesService::new(cache.clone(), config.clone(), http.clone())
                .with_policies(policies),
            products: ProductsService::new(cache.clone(), config.clone(), http)
                .with_policies(policies),
            cache,
            config,
        }
    }

    /// Builds a client with a fresh cache and the reqwest transport.
    pub fn from_config(config: &SdkConfig) -> Result<Self> {
        let manager = ConfigManager::from_config(config)?;
        let http = ReqwestClient::new(
            manager.clone(),
            Duration::from_millis(config.request_timeout_ms),
        )?;
        Ok(Self::new(
            manager,
            Cache::new(),
            Arc::new(http),
            CachePolicies::from_config(config),
        ))
    }

    pub fn banners(&self) -> &BannersService {
        &self.banners
    }

    pub fn categories(&self) -> &CategoriesService {
        &self.categories
    }

    pub fn products(&self) -> &ProductsService {
        &self.products
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }
}
