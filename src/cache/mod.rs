//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and tag-based invalidation.

mod clock;
mod entry;
mod facade;
pub mod keys;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use facade::{Cache, CacheOptions, UserCache};
pub use keys::Resource;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
