//! Categories service

use std::sync::Arc;

use crate::cache::{Cache, Resource};
use crate::config::ConfigManager;
use crate::error::Result;
use crate::http::{HttpClient, Request};
use crate::models::{ApiEnvelope, Category};

use super::{CachePolicies, CachedRead, ServiceContext};

const RESOURCE: Resource = Resource::Categories;

/// Cached access to the category endpoints.
#[derive(Clone)]
pub struct CategoriesService {
    ctx: ServiceContext,
    policies: CachePolicies,
}

impl CategoriesService {
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

    /// Lists every category with its subcategories. Key `categories:list`.
    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        let read = CachedRead::new(RESOURCE.list_key(&[]), self.policies.categories_list)
            .tagged([RESOURCE.tag(), RESOURCE.operation_tag("list")]);
        let url = self.ctx.url(&["categories"], &[])?;

        self.ctx
            .read_through(read, Request::Get(url), ApiEnvelope::<Vec<Category>>::into_data)
            .await
    }

    /// Fetches one category. Key `categories:detail:<id>`.
    pub async fn get_category_by_id(&self, id: &str) -> Result<Category> {
        let read = CachedRead::new(RESOURCE.detail_key(id, &[]), self.policies.categories_detail)
            .tagged([
                RESOURCE.tag(),
                RESOURCE.operation_tag("detail"),
                RESOURCE.entity_tag(id),
            ]);
        let url = self.ctx.url(&["categories", id], &[])?;

        self.ctx
            .read_through(read, Request::Get(url), ApiEnvelope::<Category>::into_data)
            .await
    }

    /// Drops every cached read about category `id`.
    pub fn invalidate_category(&self, id: &str) -> usize {
        self.ctx.cache.invalidate_tag(&RESOURCE.entity_tag(id))
    }

    /// Drops every cached category read.
    pub fn invalidate_all(&self) -> usize {
        self.ctx.cache.invalidate_tag(RESOURCE.as_str())
    }
}
