//! Catalog SDK - typed client for the catalog API
//!
//! Wraps the banners, categories and products endpoints behind services that
//! share one in-memory TTL cache with tag-based invalidation.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod tasks;

pub use cache::{Cache, CacheOptions};
pub use client::CatalogClient;
pub use config::{ConfigManager, SdkConfig};
pub use error::{Result, SdkError};
pub use tasks::spawn_cleanup_task;
