pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{HttpListingSource, InMemoryListingSource, JsonFileListingSource, LocalStorage};
pub use crate::core::commute::estimate_commute;
pub use crate::core::geo::{haversine_distance_km, rank_nearest, DEFAULT_NEAREST_LIMIT, EARTH_RADIUS_KM};
pub use crate::core::service::{CommuteQuery, CommuteService};
pub use crate::domain::model::{
    CommuteEstimate, CommuteParams, CommuteReport, GeoPoint, Job, Location, NearbyListing,
    Property, RankedEntry,
};
pub use crate::utils::error::{GeoError, Result};
