//! Banners service

use std::sync::Arc;

use crate::cache::{Cache, Resource};
use crate::config::ConfigManager;
use crate::error::Result;
use crate::http::{HttpClient, Request};
use crate::models::{ApiEnvelope, Banner};

use super::{CachePolicies, CachedRead, ServiceContext};

const RESOURCE: Resource = Resource::Banners;

/// Cached access to `GET banners/`.
#[derive(Clone)]
pub struct BannersService {
    ctx: ServiceContext,
    policies: CachePolicies,
}

impl BannersService {
    pub fn new(cache: Cache, config: ConfigManager, http: Arc<dyn HttpClient>) -> Self {
        Self {
            ctx: ServiceContext::new(cache, config, http),
            policies: CachePolicies::default(),
        }
    }

    pub fn with_policies(mut self, policies: CachePolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Lists every banner. Key `banners:list`.
    pub async fn get_banners(&self) -> Result<Vec<Banner>> {
        let read = CachedRead::new(RESOURCE.list_key(&[]), self.policies.banners_list)
            .tagged([RESOURCE.tag(), RESOURCE.operation_tag("list")]);
        let url = self.ctx.url(&["banners"], &[])?;

        self.ctx
            .read_through(read, Request::Get(url), ApiEnvelope::<Vec<Banner>>::into_data)
            .await
    }

    /// Drops every cached banner read.
    pub fn invalidate_all(&self) -> usize {
        self.ctx.cache.invalidate_tag(RESOURCE.as_str())
    }
}
