//! Error types for the ingestion layer.

use thiserror::Error;

/// Errors produced while fetching from a provider or routing a sync.
///
/// Every variant except `UnknownProvider` and `Config` names the provider it
/// came from, so an aggregated status report can attribute it.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{provider}: request timed out")]
    Timeout { provider: String },
    #[error("{provider}: upstream returned HTTP {status}")]
    Upstream { provider: String, status: u16 },
    #[error("{provider}: malformed response: {detail}")]
    MalformedResponse { provider: String, detail: String },
    #[error("{provider}: transport failure: {message}")]
    Transport { provider: String, message: String },
    #[error("no provider registered under '{provider_name}'")]
    UnknownProvider { provider_name: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl SyncError {
    /// Maps a wire-level error onto the taxonomy for `provider`.
    pub fn from_api(provider: &str, err: superpac_api::Error) -> Self {
        let provider = provider.to_string();
        match err {
            superpac_api::Error::Timeout { .. } => SyncError::Timeout { provider },
            superpac_api::Error::RateLimited => SyncError::Upstream {
                provider,
                status: 429,
            },
            superpac_api::Error::HttpStatus { status, .. } => {
                SyncError::Upstream { provider, status }
            }
            superpac_api::Error::Parse(detail) => SyncError::MalformedResponse { provider, detail },
            superpac_api::Error::InvalidUrl(message) | superpac_api::Error::RequestFailed(message) => {
                SyncError::Transport { provider, message }
            }
        }
    }

    /// The provider this error is attributed to, if any.
    pub fn provider(&self) -> Option<&str> {
        match self {
            SyncError::Timeout { provider }
            | SyncError::Upstream { provider, .. }
            | SyncError::MalformedResponse { provider, .. }
            | SyncError::Transport { provider, .. } => Some(provider),
            SyncError::UnknownProvider { .. } | SyncError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_onto_taxonomy() {
        let err = SyncError::from_api("fec", superpac_api::Error::Timeout { timeout_ms: 50 });
        assert!(matches!(err, SyncError::Timeout { ref provider } if provider == "fec"));

        let err = SyncError::from_api(
            "twitter",
            superpac_api::Error::HttpStatus {
                status: 502,
                body: String::new(),
            },
        );
        assert!(matches!(err, SyncError::Upstream { status: 502, .. }));

        let err = SyncError::from_api("aclu", superpac_api::Error::RateLimited);
        assert!(matches!(err, SyncError::Upstream { status: 429, .. }));

        let err = SyncError::from_api("youtube", superpac_api::Error::Parse("eof".into()));
        assert!(matches!(err, SyncError::MalformedResponse { .. }));
        assert_eq!(err.provider(), Some("youtube"));
    }

    #[test]
    fn display_names_provider() {
        let err = SyncError::Upstream {
            provider: "facebook".into(),
            status: 500,
        };
        assert_eq!(err.to_string(), "facebook: upstream returned HTTP 500");

        let err = SyncError::UnknownProvider {
            provider_name: "NoSuchProvider".into(),
        };
        assert!(err.to_string().contains("NoSuchProvider"));
        assert_eq!(err.provider(), None);
    }
}
