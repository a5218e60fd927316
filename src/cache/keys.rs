//! Cache Key Module
//!
//! Builds cache keys and invalidation tags for the catalog resources.
//!
//! # Key Formats
//! - `<resource>:list[:<flag>...]`
//! - `<resource>:detail:<id>[:<flag>...]`
//! - `<resource>:search:<query>:<page>:<limit>`
//! - `<resource>:filter:<sku1,sku2,...>:<page>:<limit>:<flag>`
//! - `<resource>:<id>:variations`
//!
//! Fields are joined with `:`. SKU lists keep the caller's order, so
//! `[A, B]` and `[B, A]` map to different keys. Inside the SKU field each
//! SKU is percent-encoded (`%`, `,`, `:`, controls and non-ASCII bytes), so
//! `["A,B"]` and `["A", "B"]` never share a key. Plain SKUs are unchanged.

use std::fmt::{self, Display};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Field delimiter inside keys and tags.
pub const KEY_DELIMITER: char = ':';

/// Delimiter for list items inside a single field.
pub const LIST_DELIMITER: char = ',';

/// Bytes escaped inside a single SKU.
const SKU_ESCAPES: &AsciiSet = &CONTROLS.add(b'%').add(b',').add(b':');

// == Resource ==
/// Top-level namespace of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Banners,
    Categories,
    Products,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Banners => "banners",
            Resource::Categories => "categories",
            Resource::Products => "products",
        }
    }

    // == Tags ==
    /// Tag carried by every entry of the resource.
    pub fn tag(&self) -> String {
        self.as_str().to_string()
    }

    /// Tag carried by every entry of one operation, e.g. `products:list`.
    pub fn operation_tag(&self, operation: &str) -> String {
        format!("{self}{KEY_DELIMITER}{operation}")
    }

    /// Tag carried by every entry about one entity, e.g. `products:42`.
    pub fn entity_tag(&self, id: impl Display) -> String {
        format!("{self}{KEY_DELIMITER}{id}")
    }

    /// Tag carried by every page of one search, e.g. `products:search:truck`.
    pub fn query_tag(&self, query: &str) -> String {
        format!("{self}{KEY_DELIMITER}search{KEY_DELIMITER}{query}")
    }

    // == Keys ==
    pub fn list_key(&self, flags: &[bool]) -> String {
        let mut key = self.operation_tag("list");
        push_flags(&mut key, flags);
        key
    }

    pub fn detail_key(&self, id: impl Display, flags: &[bool]) -> String {
        let mut key = format!("{self}{KEY_DELIMITER}detail{KEY_DELIMITER}{id}");
        push_flags(&mut key, flags);
        key
    }

    pub fn search_key(&self, query: &str, page: u32, limit: u32) -> String {
        format!(
            "{}{KEY_DELIMITER}{page}{KEY_DELIMITER}{limit}",
            self.query_tag(query)
        )
    }

    pub fn filter_key<S: AsRef<str>>(&self, skus: &[S], page: u32, limit: u32, flag: bool) -> String {
        let items: Vec<String> = skus
            .iter()
            .map(|sku| utf8_percent_encode(sku.as_ref(), SKU_ESCAPES).to_string())
            .collect();
        let joined = items.join(&LIST_DELIMITER.to_string());
        format!(
            "{self}{KEY_DELIMITER}filter{KEY_DELIMITER}{joined}{KEY_DELIMITER}{page}{KEY_DELIMITER}{limit}{KEY_DELIMITER}{flag}"
        )
    }

    pub fn variations_key(&self, id: impl Display) -> String {
        format!("{self}{KEY_DELIMITER}{id}{KEY_DELIMITER}variations")
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn push_flags(key: &mut String, flags: &[bool]) {
    for flag in flags {
        key.push(KEY_DELIMITER);
        key.push_str(if *flag { "true" } else { "false" });
    }
}
