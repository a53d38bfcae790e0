mod common;
pub use self::common::{OneOrMany, Scalar};
pub(crate) use self::common::lenient;

pub mod aclu;
pub mod adimpact;
pub mod facebook;
pub mod fec;
pub mod opensecrets;
pub mod tvarchive;
pub mod twitter;
pub mod youtube;
