//! Shared query infrastructure: the [`Query`] trait and URL helpers.

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Appends `key=value` when the value is present.
pub(crate) fn append_opt<T: ToString>(url: &mut Url, key: &str, value: Option<T>) {
    if let Some(value) = value {
        url.query_pairs_mut().append_pair(key, &value.to_string());
    }
}
