mod common;
pub use self::common::Query;

mod twitter;
pub use self::twitter::TwitterAdsQuery;

mod facebook;
pub use self::facebook::FacebookArchiveQuery;

mod youtube;
pub use self::youtube::YouTubeCreativeQuery;

mod fec;
pub use self::fec::ScheduleEQuery;

mod opensecrets;
pub use self::opensecrets::IndependentExpendQuery;

mod adimpact;
pub use self::adimpact::AiringsQuery;

mod tvarchive;
pub use self::tvarchive::ArchiveSearchQuery;

mod aclu;
pub use self::aclu::AdWatchQuery;
