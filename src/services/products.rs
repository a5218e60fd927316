//! Products service

use std::sync::Arc;

use serde_json::json;

use crate::cache::{Cache, Resource};
use crate::config::ConfigManager;
use crate::error::Result;
use crate::http::{HttpClient, Request};
use crate::models::{
    ApiEnvelope, Product, ProductFilterBySkuResponse, ProductSearchResponse, ProductVariation,
};

use super::{flag, CachePolicies, CachedRead, ServiceContext};

const RESOURCE: Resource = Resource::Products;

/// Cached access to the product endpoints.
///
/// Entity reads (detail, variations) carry the `products:<id>` tag and search
/// pages carry `products:search:<query>`, which is what the `invalidate_*`
/// methods target.
#[derive(Clone)]
pub struct ProductsService {
    ctx: ServiceContext,
    policies: CachePolicies,
}

impl ProductsService {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;

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

    // == List ==
    /// Lists products. Key `products:list:<include_variations>:<group_attributes>`.
    pub async fn get_products(
        &self,
        include_variations: bool,
        group_attributes: bool,
    ) -> Result<Vec<Product>> {
        let read = CachedRead::new(
            RESOURCE.list_key(&[include_variations, group_attributes]),
            self.policies.products_list,
        )
        .tagged([RESOURCE.tag(), RESOURCE.operation_tag("list")]);
        let url = self.ctx.url(
            &["products"],
            &[
                ("include_variations", flag(include_variations)),
                ("group_attributes", flag(group_attributes)),
            ],
        )?;

        self.ctx
            .read_through(read, Request::Get(url), ApiEnvelope::<Vec<Product>>::into_data)
            .await
    }

    // == Detail ==
    /// Fetches one product.
    /// Key `products:detail:<id>:<include_variations>:<group_attributes>`.
    pub async fn get_product_by_id(
        &self,
        id: u64,
        include_variations: bool,
        group_attributes: bool,
    ) -> Result<Product> {
        let read = CachedRead::new(
            RESOURCE.detail_key(id, &[include_variations, group_attributes]),
            self.policies.products_detail,
        )
        .tagged([
            RESOURCE.tag(),
            RESOURCE.operation_tag("detail"),
            RESOURCE.entity_tag(id),
        ]);
        let id_segment = id.to_string();
        let url = self.ctx.url(
            &["products", id_segment.as_str()],
            &[
                ("include_variations", flag(include_variations)),
                ("group_attributes", flag(group_attributes)),
            ],
        )?;

        self.ctx
            .read_through(read, Request::Get(url), ApiEnvelope::<Product>::into_data)
            .await
    }

    // == Search ==
    /// Full-text product search. Key `products:search:<query>:<page>:<limit>`.
    pub async fn search_products(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<ProductSearchResponse> {
        let read = CachedRead::new(
            RESOURCE.search_key(query, page, limit),
            self.policies.products_search,
        )
        .tagged([
            RESOURCE.tag(),
            RESOURCE.operation_tag("search"),
            RESOURCE.query_tag(query),
        ]);
        let url = self.ctx.url(
            &["products", "search"],
            &[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;

        self.ctx
            .read_through(read, Request::Get(url), |body: ProductSearchResponse| body)
            .await
    }

    // == Filter ==
    /// Fetches the products matching `skus`, in the order given.
    /// Key `products:filter:<sku1,sku2,...>:<page>:<limit>:<include_variations>`.
    pub async fn filter_products_by_sku<S: AsRef<str>>(
        &self,
        skus: &[S],
        page: u32,
        limit: u32,
        include_variations: bool,
    ) -> Result<ProductFilterBySkuResponse> {
        let read = CachedRead::new(
            RESOURCE.filter_key(skus, page, limit, include_variations),
            self.policies.products_filter,
        )
        .tagged([RESOURCE.tag(), RESOURCE.operation_tag("filter")]);
        let url = self.ctx.url(&["products", "filter-by-sku"], &[])?;
        let skus: Vec<&str> = skus.iter().map(AsRef::as_ref).collect();
        let body = json!({
            "skus": skus,
            "page": page,
            "limit": limit,
            "include_variations": include_variations,
        });

        self.ctx
            .read_through(read, Request::Post(url, body), |body: ProductFilterBySkuResponse| body)
            .await
    }

    // == Variations ==
    /// Lists the variations of one product. Key `products:<id>:variations`.
    pub async fn get_product_variations(&self, id: u64) -> Result<Vec<ProductVariation>> {
        let read = CachedRead::new(RESOURCE.variations_key(id), self.policies.products_variations)
            .tagged([
                RESOURCE.tag(),
                RESOURCE.operation_tag("variations"),
                RESOURCE.entity_tag(id),
            ]);
        let id_segment = id.to_string();
        let url = self.ctx.url(&["products", id_segment.as_str(), "variations"], &[])?;

        self.ctx
            .read_through(
                read,
                Request::Get(url),
                ApiEnvelope::<Vec<ProductVariation>>::into_data,
            )
            .await
    }

    // == Invalidation ==
    /// Drops the cached detail and variation reads of product `id`.
    pub fn invalidate_product(&self, id: u64) -> usize {
        self.ctx.cache.invalidate_tag(&RESOURCE.entity_tag(id))
    }

    /// Drops every cached page of one search.
    pub fn invalidate_search(&self, query: &str) -> usize {
        self.ctx.cache.invalidate_tag(&RESOURCE.query_tag(query))
    }

    /// Drops every cached product read.
    pub fn invalidate_all(&self) -> usize {
        self.ctx.cache.invalidate_tag(RESOURCE.as_str())
    }
}
