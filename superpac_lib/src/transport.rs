//! HTTP plumbing an adapter owns: client, rate limiter and retry budget.
//!
//! Every call through [`ProviderHttp`] is bounded by the provider's
//! `timeout_ms`, end to end.

use std::time::Duration;

use serde::de::DeserializeOwned;
use superpac_api::{Auth, Client, Query};

use crate::config::ProviderConfig;
use crate::error::SyncError;
use crate::rate_limiter::{with_retry, RateLimiter, RetryPolicy, TrackerSummary};
use crate::source::ProviderSpendingSummary;

pub struct ProviderHttp {
    provider: &'static str,
    client: Client,
    limiter: RateLimiter,
    retry: RetryPolicy,
    budget: Duration,
}

impl ProviderHttp {
    pub fn new(
        provider: &'static str,
        config: &ProviderConfig,
        auth: Auth,
        default_rate_limit: u32,
    ) -> Result<Self, SyncError> {
        let client = Client::new(&config.base_url, auth, config.timeout())
            .map_err(|e| SyncError::from_api(provider, e))?;
        let rate_limit = config.rate_limit.unwrap_or(default_rate_limit);
        tracing::debug!(
            "{}: base_url={} timeout={}ms rate_limit={}/min max_retries={} retry_backoff={}ms",
            provider,
            config.base_url,
            config.timeout_ms,
            rate_limit,
            config.max_retries,
            config.retry_backoff_ms
        );
        Ok(Self {
            provider,
            client,
            limiter: RateLimiter::per_minute(provider, rate_limit),
            retry: RetryPolicy::from_config(config),
            budget: config.timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn auth(&self) -> &Auth {
        self.client.auth()
    }

    /// Rate-limited GET with 429 retry, errors attributed to this provider.
    /// Running past `timeout_ms` yields [`SyncError::Timeout`].
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, SyncError>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        with_retry(&self.limiter, &self.retry, self.budget, || {
            self.client.get_json::<T, Q>(path, query)
        })
        .await
        .map_err(|e| SyncError::from_api(self.provider, e))
    }

    /// GET whose body is passed through as a spending summary.
    pub async fn spending<Q: Query>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        let payload: serde_json::Value = self.get(path, query).await?;
        Ok(ProviderSpendingSummary {
            provider: self.provider.to_string(),
            fetched_at: chrono::Utc::now(),
            payload,
        })
    }

    pub fn summary(&self) -> TrackerSummary {
        self.limiter.tracker().summary()
    }
}
