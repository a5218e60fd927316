//! Catalog API models
//!
//! Typed shapes of the JSON bodies returned by the catalog API. Every model
//! is both `Serialize` and `Deserialize` so it can round-trip through the cache.

pub mod banners;
pub mod categories;
pub mod products;

use serde::{Deserialize, Serialize};

pub use banners::Banner;
pub use categories::{Category, Subcategory};
pub use products::{
    Pagination, Product, ProductFeatures, ProductFilterBySkuResponse, ProductFilterPage,
    ProductSearchPage, ProductSearchResponse, ProductSearchResult, ProductVariation,
};

// == Envelope ==
/// Standard `{ "data": ..., "message": ... }` wrapper used by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}
