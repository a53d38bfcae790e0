//! OpenSecrets `independentExpend` payloads.
//!
//! Every field lives under an `@attributes` object, amounts are strings,
//! and `indexp` collapses to a bare object when there is a single result.

use serde::{Deserialize, Serialize};

use super::{lenient, OneOrMany, Scalar};

/// Top-level `{"response": {...}}` envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndependentExpendResponse {
    pub response: IndependentExpendBody,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndependentExpendBody {
    #[serde(default)]
    pub indexp: OneOrMany<IndependentExpendEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndependentExpendEntry {
    #[serde(rename = "@attributes")]
    pub attributes: IndependentExpendAttributes,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndependentExpendAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub cmteid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub fecid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pacshort: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub suppopp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub candname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub party: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub payee: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source: Option<String>,
}
