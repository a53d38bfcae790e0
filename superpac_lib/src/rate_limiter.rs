//! Per-provider request pacing and the retry loop around one adapter call.
//!
//! Each provider gets a sliding-window limiter sized from its `rate_limit`
//! (requests per minute). One adapter call runs against a single deadline
//! derived from `timeout_ms`: waiting for a window slot, every attempt and
//! every 429 backoff all spend from it. Only HTTP 429 is retried.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use superpac_api::Error as ApiError;
use tokio::sync::Mutex;
use tokio::time::{sleep, sleep_until, timeout_at, Instant};

use crate::config::ProviderConfig;

/// Window that `rate_limit` is expressed against.
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Stand-in deadline for budgets too large to add to `Instant::now()`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Sliding window of recent sends for one provider.
pub struct RateLimiter {
    provider: &'static str,
    sent: Mutex<VecDeque<Instant>>,
    capacity: usize,
    window: Duration,
    tracker: RequestTracker,
}

impl RateLimiter {
    /// `per_minute` requests in any 60s window. Zero still admits one.
    pub fn per_minute(provider: &'static str, per_minute: u32) -> Self {
        Self::with_window(provider, per_minute, RATE_WINDOW)
    }

    pub fn with_window(provider: &'static str, capacity: u32, window: Duration) -> Self {
        let capacity = capacity.max(1) as usize;
        Self {
            provider,
            sent: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
            window,
            tracker: RequestTracker::default(),
        }
    }

    pub fn provider(&self) -> &'static str {
        self.provider
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Claim a send slot, sleeping until the oldest send ages out of the
    /// window. Returns `false` without waiting when no slot opens by
    /// `deadline`.
    pub async fn acquire_before(&self, deadline: Instant) -> bool {
        loop {
            let opens_at = {
                let mut sent = self.sent.lock().await;
                let now = Instant::now();
                while sent
                    .front()
                    .is_some_and(|&t| now.duration_since(t) >= self.window)
                {
                    sent.pop_front();
                }
                if sent.len() < self.capacity {
                    sent.push_back(now);
                    return true;
                }
                let Some(&oldest) = sent.front() else {
                    continue;
                };
                oldest + self.window
            };

            if opens_at > deadline {
                tracing::debug!("{}: rate window stays full past the deadline", self.provider);
                return false;
            }
            tracing::debug!(
                "{}: rate window full, next slot in {:?}",
                self.provider,
                opens_at.saturating_duration_since(Instant::now())
            );
            sleep_until(opens_at).await;
        }
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }
}

/// How a single send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    RateLimited,
    Failed,
    /// Still in flight when the call's deadline passed.
    CutOff,
}

/// Counters for one provider's sends, shared by every call on its adapter.
#[derive(Default)]
pub struct RequestTracker {
    made: AtomicU64,
    succeeded: AtomicU64,
    rate_limited: AtomicU64,
    failed: AtomicU64,
    deadlines_exceeded: AtomicU64,
    backoff_ms: AtomicU64,
}

impl RequestTracker {
    pub fn record(&self, outcome: Outcome) {
        self.made.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Succeeded => &self.succeeded,
            Outcome::RateLimited => &self.rate_limited,
            Outcome::Failed => &self.failed,
            Outcome::CutOff => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// A call ran out of its time budget, whatever it was doing at the time.
    pub fn record_deadline_exceeded(&self) {
        self.deadlines_exceeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backoff(&self, wait: Duration) {
        let ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self.backoff_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            requests_made: self.made.load(Ordering::Relaxed),
            requests_succeeded: self.succeeded.load(Ordering::Relaxed),
            requests_rate_limited: self.rate_limited.load(Ordering::Relaxed),
            requests_failed: self.failed.load(Ordering::Relaxed),
            deadlines_exceeded: self.deadlines_exceeded.load(Ordering::Relaxed),
            total_backoff_secs: self.backoff_ms.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}

/// Snapshot of a provider's request counters, printed after a sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackerSummary {
    pub requests_made: u64,
    pub requests_succeeded: u64,
    pub requests_rate_limited: u64,
    pub requests_failed: u64,
    pub deadlines_exceeded: u64,
    pub total_backoff_secs: f64,
}

/// 429 retry settings for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_backoff: config.retry_backoff(),
        }
    }

    /// Wait before retry `retry` (0-based): `base_backoff * 2^retry` plus up
    /// to one `base_backoff` of jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let doubled = self.base_backoff.saturating_mul(1u32 << retry.min(16));
        let ceiling = u64::try_from(self.base_backoff.as_millis()).unwrap_or(u64::MAX);
        doubled.saturating_add(Duration::from_millis(rand::thread_rng().gen_range(0..=ceiling)))
    }
}

/// Run one paced call for `limiter`'s provider, retrying 429s per `policy`.
///
/// The whole call, slot waits and backoffs included, is bounded by `budget`.
/// Running out yields [`ApiError::Timeout`] with `budget` as the timeout; a
/// backoff that would end past the deadline gives up immediately instead of
/// sleeping into it. Errors other than 429 are returned on first sight.
pub async fn with_retry<F, Fut, T>(
    limiter: &RateLimiter,
    policy: &RetryPolicy,
    budget: Duration,
    operation: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let provider = limiter.provider();
    let tracker = limiter.tracker();
    let deadline = Instant::now()
        .checked_add(budget)
        .unwrap_or_else(|| Instant::now() + FAR_FUTURE);
    let out_of_time = || {
        tracker.record_deadline_exceeded();
        ApiError::Timeout {
            timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }
    };

    let mut retries = 0u32;
    loop {
        if !limiter.acquire_before(deadline).await {
            tracing::warn!("{}: no request slot within {:?}", provider, budget);
            return Err(out_of_time());
        }

        let Ok(result) = timeout_at(deadline, operation()).await else {
            tracker.record(Outcome::CutOff);
            tracing::warn!("{}: request still running after {:?}", provider, budget);
            return Err(out_of_time());
        };

        match result {
            Ok(value) => {
                tracker.record(Outcome::Succeeded);
                return Ok(value);
            }
            Err(ApiError::RateLimited) => {
                tracker.record(Outcome::RateLimited);
                if retries >= policy.max_retries {
                    return Err(ApiError::RateLimited);
                }
                let wait = policy.backoff(retries);
                let overruns = Instant::now()
                    .checked_add(wait)
                    .map_or(true, |resume| resume >= deadline);
                if overruns {
                    tracing::warn!(
                        "{}: HTTP 429, backoff of {:?} would overrun the {:?} budget",
                        provider,
                        wait,
                        budget
                    );
                    return Err(out_of_time());
                }
                tracing::warn!(
                    "{}: HTTP 429 (attempt {}/{}), retrying in {:?}",
                    provider,
                    retries + 1,
                    policy.max_retries + 1,
                    wait
                );
                tracker.record_backoff(wait);
                sleep(wait).await;
                retries += 1;
            }
            Err(e) => {
                tracker.record(Outcome::Failed);
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    fn policy(max_retries: u32, base_backoff_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_backoff: Duration::from_millis(base_backoff_ms),
        }
    }

    /// Operation that answers 429 `rate_limited` times, then `Ok(calls)`.
    fn throttled(
        rate_limited: u32,
        calls: Arc<AtomicU32>,
    ) -> impl Fn() -> std::future::Ready<Result<u32, ApiError>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n <= rate_limited {
                Err(ApiError::RateLimited)
            } else {
                Ok(n)
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slot_frees_when_oldest_send_ages_out() {
        let limiter = RateLimiter::with_window("fec", 2, Duration::from_secs(10));
        let far = Instant::now() + Duration::from_secs(600);
        assert!(limiter.acquire_before(far).await);
        assert!(limiter.acquire_before(far).await);
        assert!(!limiter.acquire_before(Instant::now()).await);

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(limiter.acquire_before(Instant::now()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_a_slot_inside_the_deadline() {
        let limiter = RateLimiter::with_window("tvarchive", 1, Duration::from_secs(5));
        let start = Instant::now();
        assert!(limiter.acquire_before(start).await);

        assert!(limiter.acquire_before(start + Duration::from_secs(6)).await);
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[test]
    fn zero_rate_limit_still_admits_one_request() {
        assert_eq!(RateLimiter::per_minute("aclu", 0).capacity(), 1);
    }

    #[test]
    fn backoff_doubles_with_bounded_jitter() {
        let p = policy(3, 100);
        let first = p.backoff(0);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(200));
        let third = p.backoff(2);
        assert!(third >= Duration::from_millis(400) && third <= Duration::from_millis(500));
    }

    #[test]
    fn tracker_counts_outcomes() {
        let tracker = RequestTracker::default();
        tracker.record(Outcome::Succeeded);
        tracker.record(Outcome::RateLimited);
        tracker.record(Outcome::Failed);
        tracker.record(Outcome::CutOff);
        tracker.record_deadline_exceeded();
        tracker.record_backoff(Duration::from_millis(1500));

        let summary = tracker.summary();
        assert_eq!(summary.requests_made, 4);
        assert_eq!(summary.requests_succeeded, 1);
        assert_eq!(summary.requests_rate_limited, 1);
        assert_eq!(summary.requests_failed, 1);
        assert_eq!(summary.deadlines_exceeded, 1);
        assert!((summary.total_backoff_secs - 1.5).abs() < 0.001);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_then_success() {
        let limiter = RateLimiter::per_minute("fec", 100);
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry(
            &limiter,
            &policy(3, 100),
            Duration::from_secs(60),
            throttled(2, Arc::clone(&calls)),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        let summary = limiter.tracker().summary();
        assert_eq!(summary.requests_succeeded, 1);
        assert_eq!(summary.requests_rate_limited, 2);
        assert_eq!(summary.deadlines_exceeded, 0);
        assert!(summary.total_backoff_secs >= 0.3);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_exhausted_surface_the_429() {
        let limiter = RateLimiter::per_minute("opensecrets", 100);
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry(
            &limiter,
            &policy(2, 100),
            Duration::from_secs(60),
            throttled(u32::MAX, Arc::clone(&calls)),
        )
        .await;

        assert!(matches!(result, Err(ApiError::RateLimited)));
        // first attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(limiter.tracker().summary().requests_rate_limited, 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let limiter = RateLimiter::per_minute("youtube", 100);
        let calls = Arc::new(AtomicU32::new(0));
        let counted = Arc::clone(&calls);

        let result = with_retry(&limiter, &policy(3, 10), Duration::from_secs(5), move || {
            counted.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Err::<u32, _>(ApiError::HttpStatus {
                status: 503,
                body: String::new(),
            }))
        })
        .await;

        assert!(matches!(result, Err(ApiError::HttpStatus { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let summary = limiter.tracker().summary();
        assert_eq!(summary.requests_failed, 1);
        assert_eq!(summary.deadlines_exceeded, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn full_window_past_deadline_times_out_without_sending() {
        let limiter = RateLimiter::per_minute("fec", 1);
        let calls = Arc::new(AtomicU32::new(0));
        let budget = Duration::from_secs(2);

        let first = with_retry(&limiter, &policy(0, 10), budget, throttled(0, Arc::clone(&calls))).await;
        assert!(first.is_ok());

        let start = Instant::now();
        let second = with_retry(&limiter, &policy(0, 10), budget, throttled(0, Arc::clone(&calls))).await;
        assert!(matches!(second, Err(ApiError::Timeout { timeout_ms: 2000 })));
        assert!(start.elapsed() <= budget);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let summary = limiter.tracker().summary();
        assert_eq!(summary.requests_made, 1);
        assert_eq!(summary.deadlines_exceeded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_request_is_cut_at_the_deadline() {
        let limiter = RateLimiter::per_minute("facebook", 100);
        let start = Instant::now();

        let result = with_retry(&limiter, &policy(2, 10), Duration::from_secs(3), || async {
            sleep(Duration::from_secs(600)).await;
            Ok::<u32, ApiError>(1)
        })
        .await;

        assert!(matches!(result, Err(ApiError::Timeout { timeout_ms: 3000 })));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_millis(3_010));
        let summary = limiter.tracker().summary();
        assert_eq!(summary.requests_made, 1);
        assert_eq!(summary.requests_failed, 0);
        assert_eq!(summary.deadlines_exceeded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_past_deadline_gives_up_before_sleeping() {
        let limiter = RateLimiter::per_minute("adimpact", 100);
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = with_retry(
            &limiter,
            &policy(5, 10_000),
            Duration::from_secs(3),
            throttled(u32::MAX, Arc::clone(&calls)),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Timeout { timeout_ms: 3000 })));
        assert!(start.elapsed() < Duration::from_millis(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let summary = limiter.tracker().summary();
        assert_eq!(summary.requests_rate_limited, 1);
        assert_eq!(summary.deadlines_exceeded, 1);
        assert_eq!(summary.total_backoff_secs, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn backoffs_stop_once_the_budget_is_spent() {
        let limiter = RateLimiter::per_minute("twitter", 100);
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        // 1s backoffs (plus jitter) fit once or twice into 5s, never five times.
        let result = with_retry(
            &limiter,
            &policy(5, 1_000),
            Duration::from_secs(5),
            throttled(u32::MAX, Arc::clone(&calls)),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Timeout { .. })));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(calls.load(Ordering::SeqCst) < 6);
    }
}
