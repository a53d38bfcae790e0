//! ACLU Political Ad Watch payloads.

use serde::{Deserialize, Serialize};

use super::{lenient, Scalar};

/// Response wrapper for `/api/ads`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdWatchResponse {
    pub items: Vec<AdWatchItem>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// A tracked ad. `first_seen`/`last_seen` are unix seconds.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdWatchItem {
    #[serde(default, deserialize_with = "lenient")]
    pub uid: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub reported_spend: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub views: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub clicks: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_seen: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_seen: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub lean: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sponsor: Option<String>,
}
