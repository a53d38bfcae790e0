//! Ingestion layer for political ad spend: provider adapters that normalize
//! native payloads into [`Ad`], a [`Registry`] built from the available
//! credentials, and an [`Aggregator`] that fans out across providers with
//! per-provider failure isolation.

pub mod ad;
pub mod adapters;
pub mod aggregator;
pub mod config;
pub mod error;
pub mod leaning;
pub mod normalize;
pub mod rate_limiter;
pub mod registry;
pub mod source;
pub mod transport;

pub use superpac_api;

pub use ad::{Ad, AdType, PoliticalLeaning};
pub use aggregator::{Aggregator, ProviderStatus, SyncReport};
pub use config::{
    configure_adapters, known_providers, CredentialSource, EnvCredentials, ProviderConfig,
    SyncConfig,
};
pub use error::SyncError;
pub use leaning::{LeaningClassifier, LeaningSignal, NoLeaning, SupportOpposeClassifier};
pub use rate_limiter::TrackerSummary;
pub use registry::Registry;
pub use source::{AdSource, AdapterHandle, FetchOptions, ProviderSpendingSummary};
