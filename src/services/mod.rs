//! Boundaries to the two external services the lookup depends on.

pub mod air_quality_api;
pub mod geocoder;

pub use air_quality_api::{AirQualitySource, StationReadings};
pub use geocoder::{GeoPoint, GeocodeHit, Geocoder};
