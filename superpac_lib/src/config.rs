//! Provider configuration and registry construction.
//!
//! Credentials come from a [`CredentialSource`] (the process environment in
//! production). An optional TOML file tunes per-provider transport settings,
//! disables providers and picks the leaning policy:
//!
//! ```toml
//! timeout_ms = 20000
//! max_retries = 3
//! retry_backoff_ms = 500
//! disabled = ["tvarchive"]
//!
//! [providers.fec]
//! base_url = "https://api.open.fec.gov/v1"
//! rate_limit = 15
//!
//! [leaning]
//! policy = "support_oppose"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::{
    AcluAdapter, AdImpactAdapter, FacebookAdapter, FecAdapter, OpenSecretsAdapter,
    TvArchiveAdapter, TwitterAdapter, YouTubeAdapter,
};
use crate::error::SyncError;
use crate::leaning::{LeaningClassifier, LeaningConfig};
use crate::registry::Registry;
use crate::source::AdapterHandle;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// First 429 backoff; doubles per retry.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;

pub const TIMEOUT_ENV: &str = "SUPERPAC_TIMEOUT_MS";
pub const MAX_RETRIES_ENV: &str = "SUPERPAC_MAX_RETRIES";

/// Settings for one adapter. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    /// Requests per minute; the adapter's default when `None`.
    pub rate_limit: Option<u32>,
    /// Bounds one adapter call end to end: rate-limit waits, every attempt
    /// and every 429 backoff.
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            api_secret: None,
            access_token: None,
            rate_limit: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limit = Some(per_minute);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff_ms(mut self, retry_backoff_ms: u64) -> Self {
        self.retry_backoff_ms = retry_backoff_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Where credentials are read from.
pub trait CredentialSource {
    /// The value for `key`, `None` when unset or blank.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// `[providers.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderOverride {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub rate_limit: Option<u32>,
    pub max_retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
}

/// Parsed config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub timeout_ms: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub disabled: Vec<String>,
    pub providers: BTreeMap<String, ProviderOverride>,
    pub leaning: LeaningConfig,
}

impl SyncConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}

/// Static description of a provider slot: how its credentials are named and
/// whether it may run without any.
struct ProviderSlot {
    name: &'static str,
    env_prefix: &'static str,
    default_base_url: &'static str,
    reads_token: bool,
    reads_key: bool,
    reads_secret: bool,
    credential_free: bool,
}

const PROVIDER_SLOTS: [ProviderSlot; 8] = [
    ProviderSlot {
        name: TwitterAdapter::NAME,
        env_prefix: "TWITTER",
        default_base_url: TwitterAdapter::DEFAULT_BASE_URL,
        reads_token: true,
        reads_key: true,
        reads_secret: true,
        credential_free: false,
    },
    ProviderSlot {
        name: FacebookAdapter::NAME,
        env_prefix: "FACEBOOK",
        default_base_url: FacebookAdapter::DEFAULT_BASE_URL,
        reads_token: true,
        reads_key: true,
        reads_secret: false,
        credential_free: false,
    },
    ProviderSlot {
        name: YouTubeAdapter::NAME,
        env_prefix: "YOUTUBE",
        default_base_url: YouTubeAdapter::DEFAULT_BASE_URL,
        reads_token: false,
        reads_key: true,
        reads_secret: false,
        credential_free: false,
    },
    ProviderSlot {
        name: FecAdapter::NAME,
        env_prefix: "FEC",
        default_base_url: FecAdapter::DEFAULT_BASE_URL,
        reads_token: false,
        reads_key: true,
        reads_secret: false,
        credential_free: true,
    },
    ProviderSlot {
        name: OpenSecretsAdapter::NAME,
        env_prefix: "OPENSECRETS",
        default_base_url: OpenSecretsAdapter::DEFAULT_BASE_URL,
        reads_token: false,
        reads_key: true,
        reads_secret: false,
        credential_free: false,
    },
    ProviderSlot {
        name: AdImpactAdapter::NAME,
        env_prefix: "ADIMPACT",
        default_base_url: AdImpactAdapter::DEFAULT_BASE_URL,
        reads_token: false,
        reads_key: true,
        reads_secret: false,
        credential_free: false,
    },
    ProviderSlot {
        name: TvArchiveAdapter::NAME,
        env_prefix: "TVARCHIVE",
        default_base_url: TvArchiveAdapter::DEFAULT_BASE_URL,
        reads_token: false,
        reads_key: false,
        reads_secret: false,
        credential_free: true,
    },
    ProviderSlot {
        name: AcluAdapter::NAME,
        env_prefix: "ACLU",
        default_base_url: AcluAdapter::DEFAULT_BASE_URL,
        reads_token: true,
        reads_key: false,
        reads_secret: false,
        credential_free: false,
    },
];

/// Names of every provider this crate knows, in registration order.
pub fn known_providers() -> Vec<&'static str> {
    PROVIDER_SLOTS.iter().map(|slot| slot.name).collect()
}

fn env_number<T: std::str::FromStr>(credentials: &dyn CredentialSource, key: &str) -> Option<T> {
    let raw = credentials.get(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

/// Resolves the config for one slot. Precedence for transport settings:
/// `[providers.<name>]` table, then the environment, then the file's
/// top-level values, then the built-in defaults.
fn provider_config(
    slot: &ProviderSlot,
    credentials: &dyn CredentialSource,
    config: &SyncConfig,
) -> ProviderConfig {
    let var = |suffix: &str| credentials.get(&format!("{}_{}", slot.env_prefix, suffix));
    let overrides = config.providers.get(slot.name).cloned().unwrap_or_default();

    let timeout_ms = overrides
        .timeout_ms
        .or_else(|| env_number(credentials, TIMEOUT_ENV))
        .or(config.timeout_ms)
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    let max_retries = overrides
        .max_retries
        .or_else(|| env_number(credentials, MAX_RETRIES_ENV))
        .or(config.max_retries)
        .unwrap_or(DEFAULT_MAX_RETRIES);
    let retry_backoff_ms = overrides
        .retry_backoff_ms
        .or(config.retry_backoff_ms)
        .unwrap_or(DEFAULT_RETRY_BACKOFF_MS);
    let base_url = overrides
        .base_url
        .or_else(|| var("BASE_URL"))
        .unwrap_or_else(|| slot.default_base_url.to_string());

    ProviderConfig {
        base_url,
        api_key: if slot.reads_key { var("API_KEY") } else { None },
        api_secret: if slot.reads_secret { var("API_SECRET") } else { None },
        access_token: if slot.reads_token { var("ACCESS_TOKEN") } else { None },
        rate_limit: overrides.rate_limit,
        timeout_ms,
        max_retries,
        retry_backoff_ms,
    }
}

fn build_adapter(
    name: &str,
    config: &ProviderConfig,
    classifier: &Arc<dyn LeaningClassifier>,
) -> Result<AdapterHandle, SyncError> {
    let adapter: AdapterHandle = match name {
        TwitterAdapter::NAME => Arc::new(TwitterAdapter::new(config)?),
        FacebookAdapter::NAME => Arc::new(FacebookAdapter::new(config)?),
        YouTubeAdapter::NAME => Arc::new(YouTubeAdapter::new(config)?),
        FecAdapter::NAME => Arc::new(FecAdapter::new(config, Arc::clone(classifier))?),
        OpenSecretsAdapter::NAME => {
            Arc::new(OpenSecretsAdapter::new(config, Arc::clone(classifier))?)
        }
        AdImpactAdapter::NAME => Arc::new(AdImpactAdapter::new(config, Arc::clone(classifier))?),
        TvArchiveAdapter::NAME => Arc::new(TvArchiveAdapter::new(config)?),
        AcluAdapter::NAME => Arc::new(AcluAdapter::new(config)?),
        other => {
            return Err(SyncError::UnknownProvider {
                provider_name: other.to_string(),
            })
        }
    };
    Ok(adapter)
}

/// Builds the registry from whatever credentials are present.
///
/// A provider registers when at least one of its credentials is set, or
/// unconditionally when it can run anonymously (FEC, TV Ad Archive).
/// Providers listed under `disabled` are skipped.
pub fn configure_adapters(
    credentials: &dyn CredentialSource,
    config: &SyncConfig,
) -> Result<Registry, SyncError> {
    for name in config.providers.keys() {
        if !PROVIDER_SLOTS.iter().any(|slot| slot.name == name.as_str()) {
            tracing::warn!("Config names unknown provider '{}'; ignoring", name);
        }
    }

    let classifier = config.leaning.build();
    let mut registry = Registry::new();

    for slot in &PROVIDER_SLOTS {
        if config.is_disabled(slot.name) {
            tracing::info!("{} disabled by config", slot.name);
            continue;
        }
        let provider = provider_config(slot, credentials, config);
        let has_credentials = provider.access_token.is_some() || provider.api_key.is_some();
        if !has_credentials && !slot.credential_free {
            tracing::debug!("{}: no credentials, not registered", slot.name);
            continue;
        }
        registry.register(slot.name, build_adapter(slot.name, &provider, &classifier)?);
    }

    tracing::info!(
        "Registered {} provider(s): {}",
        registry.len(),
        registry.list_providers().join(", ")
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn credential_free_providers_always_register() {
        let registry = configure_adapters(&creds(&[]), &SyncConfig::default()).unwrap();
        assert_eq!(registry.list_providers(), vec!["fec", "tvarchive"]);
    }

    #[test]
    fn credentials_gate_registration() {
        let registry = configure_adapters(
            &creds(&[
                ("TWITTER_ACCESS_TOKEN", "tok"),
                ("YOUTUBE_API_KEY", "key"),
                ("ACLU_ACCESS_TOKEN", "tok"),
                ("OPENSECRETS_API_KEY", "   "),
            ]),
            &SyncConfig::default(),
        )
        .unwrap();
        assert_eq!(
            registry.list_providers(),
            vec!["twitter", "youtube", "fec", "tvarchive", "aclu"]
        );
    }

    #[test]
    fn all_providers_with_full_credentials() {
        let registry = configure_adapters(
            &creds(&[
                ("TWITTER_API_KEY", "k"),
                ("FACEBOOK_ACCESS_TOKEN", "t"),
                ("YOUTUBE_API_KEY", "k"),
                ("OPENSECRETS_API_KEY", "k"),
                ("ADIMPACT_API_KEY", "k"),
                ("ACLU_ACCESS_TOKEN", "t"),
            ]),
            &SyncConfig::default(),
        )
        .unwrap();
        assert_eq!(registry.list_providers(), known_providers());
    }

    #[test]
    fn disabled_providers_are_skipped() {
        let config = SyncConfig::from_toml_str(r#"disabled = ["TVArchive"]"#).unwrap();
        let registry = configure_adapters(&creds(&[]), &config).unwrap();
        assert_eq!(registry.list_providers(), vec!["fec"]);
    }

    #[test]
    fn override_precedence() {
        let config = SyncConfig::from_toml_str(
            r#"
            timeout_ms = 20000
            max_retries = 5

            [providers.fec]
            base_url = "http://localhost:9999"
            timeout_ms = 50
            rate_limit = 15
            "#,
        )
        .unwrap();
        let env = creds(&[("SUPERPAC_MAX_RETRIES", "1"), ("FEC_API_KEY", "key")]);

        let fec = provider_config(&PROVIDER_SLOTS[3], &env, &config);
        assert_eq!(fec.base_url, "http://localhost:9999");
        assert_eq!(fec.timeout_ms, 50);
        assert_eq!(fec.rate_limit, Some(15));
        assert_eq!(fec.max_retries, 1);
        assert_eq!(fec.api_key.as_deref(), Some("key"));

        let tv = provider_config(&PROVIDER_SLOTS[6], &env, &config);
        assert_eq!(tv.timeout_ms, 20000);
        assert_eq!(tv.base_url, TvArchiveAdapter::DEFAULT_BASE_URL);
    }

    #[test]
    fn defaults_without_config() {
        let fec = provider_config(&PROVIDER_SLOTS[3], &creds(&[]), &SyncConfig::default());
        assert_eq!(fec.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(fec.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(fec.api_key, None);
    }

    #[test]
    fn retry_backoff_precedence() {
        let config = SyncConfig::from_toml_str(
            r#"
            retry_backoff_ms = 250

            [providers.fec]
            retry_backoff_ms = 10
            "#,
        )
        .unwrap();

        let fec = provider_config(&PROVIDER_SLOTS[3], &creds(&[]), &config);
        assert_eq!(fec.retry_backoff(), Duration::from_millis(10));
        let tv = provider_config(&PROVIDER_SLOTS[6], &creds(&[]), &config);
        assert_eq!(tv.retry_backoff_ms, 250);
        let defaulted = provider_config(&PROVIDER_SLOTS[6], &creds(&[]), &SyncConfig::default());
        assert_eq!(defaulted.retry_backoff_ms, DEFAULT_RETRY_BACKOFF_MS);
    }

    #[test]
    fn invalid_env_number_is_ignored() {
        let env = creds(&[("SUPERPAC_TIMEOUT_MS", "fast")]);
        let fec = provider_config(&PROVIDER_SLOTS[3], &env, &SyncConfig::default());
        assert_eq!(fec.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn base_url_from_environment() {
        let env = creds(&[("ADIMPACT_BASE_URL", "http://127.0.0.1:8080")]);
        let cfg = provider_config(&PROVIDER_SLOTS[5], &env, &SyncConfig::default());
        assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn unknown_config_keys_rejected() {
        let err = SyncConfig::from_toml_str("timeout = 5").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }
}
