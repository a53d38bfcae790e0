//! Wire layer for the Super PAC ad-spend providers: an authenticated JSON
//! client, one query builder per provider endpoint, and the provider-native
//! response types those endpoints return.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Auth, Client};
pub use self::errors::Error;
pub use self::query::{
    AdWatchQuery, AiringsQuery, ArchiveSearchQuery, FacebookArchiveQuery, IndependentExpendQuery,
    Query, ScheduleEQuery, TwitterAdsQuery, YouTubeCreativeQuery,
};
