pub mod commute;
pub mod connection;
pub mod geo;
pub mod service;

pub use crate::domain::model::{
    CommuteEstimate, CommuteParams, CommuteReport, GeoPoint, Job, Location, NearbyListing,
    Property, RankedEntry,
};
pub use crate::domain::ports::{ConfigProvider, ListingSource, Storage};
pub use crate::utils::error::Result;
