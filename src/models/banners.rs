//! Banner models

use serde::{Deserialize, Serialize};

/// Promotional banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub web_banner_url: String,
    pub mobile_banner_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_banner_url: Option<String>,
    #[serde(default)]
    pub redirect_url: String,
    /// Start of the display window, as sent by the API
    pub start_date: String,
    pub end_date: String,
    pub active: bool,
    pub zone_code: String,
}
