//! One adapter per provider. Each module documents its ad-type vocabulary
//! and how (or whether) it derives a political leaning.

mod aclu;
mod adimpact;
mod facebook;
mod fec;
mod opensecrets;
mod tvarchive;
mod twitter;
mod youtube;

pub use self::aclu::AcluAdapter;
pub use self::adimpact::AdImpactAdapter;
pub use self::facebook::FacebookAdapter;
pub use self::fec::FecAdapter;
pub use self::opensecrets::OpenSecretsAdapter;
pub use self::tvarchive::TvArchiveAdapter;
pub use self::twitter::TwitterAdapter;
pub use self::youtube::YouTubeAdapter;

/// Provider-vocabulary → [`crate::AdType`] mappings, one per adapter.
pub mod ad_types {
    pub use super::aclu::map_ad_type as aclu;
    pub use super::adimpact::map_ad_type as adimpact;
    pub use super::facebook::map_ad_type as facebook;
    pub use super::fec::map_ad_type as fec;
    pub use super::opensecrets::map_ad_type as opensecrets;
    pub use super::tvarchive::map_ad_type as tvarchive;
    pub use super::twitter::map_ad_type as twitter;
    pub use super::youtube::map_ad_type as youtube;
}
