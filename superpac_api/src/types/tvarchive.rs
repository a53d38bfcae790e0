//! Internet Archive advanced-search payloads for the political TV ad collection.

use serde::{Deserialize, Serialize};

use super::{lenient, OneOrMany};

/// `{"response": {"numFound": .., "start": .., "docs": [..]}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveSearchResponse {
    pub response: ArchiveSearchBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSearchBody {
    #[serde(default, deserialize_with = "lenient")]
    pub num_found: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub start: Option<u64>,
    pub docs: Vec<ArchiveDoc>,
}

/// Archive item metadata. Most text fields may be a string or a list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiveDoc {
    #[serde(default, deserialize_with = "lenient")]
    pub identifier: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sponsor: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub subject: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub ad_type: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub candidate: Option<OneOrMany<String>>,
}
