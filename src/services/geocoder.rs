//! Trait and types for resolving a postal code to coordinates.

use anyhow::Result;
use std::fmt;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Rounds both coordinates to three decimal places (~100 m).
    pub fn rounded(self) -> Self {
        let round3 = |v: f64| (v * 1000.0).round() / 1000.0;
        Self {
            latitude: round3(self.latitude),
            longitude: round3(self.longitude),
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The first match for a postal code.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub point: GeoPoint,
    /// Human-readable place name as returned by the provider.
    pub display_name: String,
}

/// Abstraction over a geocoding provider (e.g., Nominatim).
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `zip` within `country` (ISO 3166-1 alpha-2).
    ///
    /// `Ok(None)` means the provider answered but had no match.
    async fn geocode(&self, zip: &str, country: &str) -> Result<Option<GeocodeHit>>;
}
