//! Concurrent fan-out over the registry.
//!
//! `sync_all` runs one task per registered provider. A provider's failure is
//! recorded in its status entry and never affects the others; the union of
//! successful results is returned in completion order.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::task::JoinSet;

use crate::ad::Ad;
use crate::error::SyncError;
use crate::registry::Registry;
use crate::source::{FetchOptions, ProviderSpendingSummary};

/// Outcome for one provider in a `sync_all`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderStatus {
    /// Records the provider returned.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl ProviderStatus {
    fn ok(count: usize, elapsed: Duration) -> Self {
        Self {
            count,
            error: None,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    fn failed(error: String, elapsed: Duration) -> Self {
        Self {
            count: 0,
            error: Some(error),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub ads: Vec<Ad>,
    pub per_provider_status: BTreeMap<String, ProviderStatus>,
}

impl SyncReport {
    /// Providers whose fetch failed, by name.
    pub fn failed_providers(&self) -> Vec<&str> {
        self.per_provider_status
            .iter()
            .filter(|(_, status)| !status.is_ok())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// True when at least one provider ran and all of them failed.
    pub fn all_failed(&self) -> bool {
        !self.per_provider_status.is_empty()
            && self.per_provider_status.values().all(|s| !s.is_ok())
    }

    pub fn total_spend(&self) -> f64 {
        self.ads.iter().map(|ad| ad.spend).sum()
    }
}

pub struct Aggregator {
    registry: Arc<Registry>,
    deadline: Option<Duration>,
}

impl Aggregator {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            deadline: None,
        }
    }

    /// Bounds the whole `sync_all`. Providers still running when it expires
    /// are aborted and reported as timed out.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn list_providers(&self) -> Vec<String> {
        self.registry.list_providers()
    }

    /// Fetches from every registered provider concurrently. Never fails; an
    /// empty registry yields an empty report.
    pub async fn sync_all(&self, options: &FetchOptions) -> SyncReport {
        let started = Instant::now();
        let mut report = SyncReport::default();
        let mut pending: HashSet<String> = HashSet::new();
        let mut tasks = JoinSet::new();

        for name in self.registry.list_providers() {
            let Some(adapter) = self.registry.get(&name) else {
                continue;
            };
            pending.insert(name.clone());
            let options = options.clone();
            tasks.spawn(async move {
                let begun = Instant::now();
                let result = adapter.fetch_ads(&options).await;
                (name, result, begun.elapsed())
            });
        }

        let deadline = self.deadline.map(|d| tokio::time::Instant::now() + d);

        loop {
            let next = match deadline {
                Some(at) => match tokio::time::timeout_at(at, tasks.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tasks.abort_all();
                        for name in pending.drain() {
                            tracing::warn!("{}: aborted at sync deadline", name);
                            let err = SyncError::Timeout {
                                provider: name.clone(),
                            };
                            report
                                .per_provider_status
                                .insert(name, ProviderStatus::failed(err.to_string(), started.elapsed()));
                        }
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            let Some(joined) = next else {
                break;
            };

            match joined {
                Ok((name, Ok(ads), elapsed)) => {
                    pending.remove(&name);
                    tracing::debug!("{}: {} ad(s) in {:?}", name, ads.len(), elapsed);
                    report
                        .per_provider_status
                        .insert(name.clone(), ProviderStatus::ok(ads.len(), elapsed));
                    // Ids are only unique within one registry entry: an adapter
                    // registered under two names yields the same ids twice.
                    let mut seen_ids: HashSet<String> = HashSet::with_capacity(ads.len());
                    for ad in ads {
                        if seen_ids.insert(ad.id.clone()) {
                            report.ads.push(ad);
                        } else {
                            tracing::debug!("{}: dropping duplicate id {}", name, ad.id);
                        }
                    }
                }
                Ok((name, Err(err), elapsed)) => {
                    pending.remove(&name);
                    tracing::warn!("{}", err);
                    report
                        .per_provider_status
                        .insert(name, ProviderStatus::failed(err.to_string(), elapsed));
                }
                Err(join_err) => {
                    tracing::warn!("Provider task did not complete: {}", join_err);
                }
            }
        }

        // Tasks that panicked never report their name back.
        for name in pending.drain() {
            report.per_provider_status.insert(
                name,
                ProviderStatus::failed("provider task aborted".to_string(), started.elapsed()),
            );
        }

        tracing::info!(
            "Sync finished: {} ad(s) from {} provider(s), {} failed, in {:?}",
            report.ads.len(),
            report.per_provider_status.len(),
            report.failed_providers().len(),
            started.elapsed()
        );
        report
    }

    /// Fetches from one provider. Errors propagate.
    pub async fn sync_one(&self, name: &str, options: &FetchOptions) -> Result<Vec<Ad>, SyncError> {
        let adapter = self.adapter(name)?;
        adapter.fetch_ads(options).await
    }

    pub async fn spending_one(
        &self,
        name: &str,
        options: &FetchOptions,
    ) -> Result<ProviderSpendingSummary, SyncError> {
        let adapter = self.adapter(name)?;
        adapter.fetch_spending_data(options).await
    }

    fn adapter(&self, name: &str) -> Result<crate::source::AdapterHandle, SyncError> {
        self.registry
            .get(name)
            .ok_or_else(|| SyncError::UnknownProvider {
                provider_name: name.to_string(),
            })
    }
}
