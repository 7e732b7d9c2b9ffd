//! Trait and types for fetching the nearest station's latest readings.

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::geocoder::GeoPoint;
use crate::index::RawReading;

/// Latest readings from a single monitoring station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationReadings {
    pub station_id: i64,
    pub name: Option<String>,
    /// City or locality the station reports, when known.
    pub locality: Option<String>,
    /// Timestamp of the most recent reading.
    pub last_updated: Option<DateTime<Utc>>,
    pub readings: Vec<RawReading>,
}

/// Abstraction over an air-quality data provider (e.g., OpenAQ).
#[async_trait::async_trait]
pub trait AirQualitySource: Send + Sync {
    /// Returns the closest station within the provider's search radius.
    ///
    /// `Ok(None)` means no station is close enough.
    async fn nearest_readings(&self, point: GeoPoint) -> Result<Option<StationReadings>>;
}
