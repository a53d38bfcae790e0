//! YouTube political-ads transparency payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/political_ads/creatives`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeCreativesResponse {
    pub creatives: Vec<YouTubeCreative>,
    #[serde(default, deserialize_with = "lenient")]
    pub next_page_token: Option<String>,
}

/// A creative with its USD spend bucket and an impressions bucket label
/// such as `"10k-100k"` or `"≥ 10M"`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeCreative {
    #[serde(default, deserialize_with = "lenient")]
    pub ad_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub advertiser_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub advertiser_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub spend_range_min_usd: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub spend_range_max_usd: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub impressions: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_range_start: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_range_end: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail_url: Option<String>,
}
