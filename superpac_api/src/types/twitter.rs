//! X (Twitter) political ads repository payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/political_ads`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwitterAdsResponse {
    pub data: Vec<TwitterAd>,
    #[serde(default, deserialize_with = "lenient")]
    pub next_cursor: Option<String>,
}

/// One promoted political post.
///
/// Spend is reported in micro-units of the account currency.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TwitterAd {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub creative_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub spend_micro: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub impressions: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub url_clicks: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub funding_entity: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub account_name: Option<String>,
}
