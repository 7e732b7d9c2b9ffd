//! Postal code → coordinates → nearest station → index → report.

use tracing::{info, warn};

use crate::error::LookupError;
use crate::index::evaluate;
use crate::report::AirQualityReport;
use crate::services::{AirQualitySource, Geocoder};

/// Runs one lookup. Each external service is called exactly once.
///
/// The report's location is the station's name, falling back to the
/// geocoder's display name for unnamed stations. A station whose readings
/// are all unusable yields an empty report rather than an error.
#[tracing::instrument(skip(geocoder, source))]
pub async fn lookup_by_zip<G, S>(
    geocoder: &G,
    source: &S,
    zip: &str,
    country: &str,
) -> Result<AirQualityReport, LookupError>
where
    G: Geocoder + ?Sized,
    S: AirQualitySource + ?Sized,
{
    let hit = geocoder
        .geocode(zip, country)
        .await
        .map_err(LookupError::Geocoder)?
        .ok_or_else(|| LookupError::GeocodeNotFound {
            zip: zip.to_string(),
            country: country.to_string(),
        })?;

    let point = hit.point;
    let station = source
        .nearest_readings(point)
        .await
        .map_err(LookupError::AirQualityApi)?
        .ok_or(LookupError::NoStationFound {
            latitude: point.latitude,
            longitude: point.longitude,
        })?;

    let evaluation = evaluate(&station.readings);
    let location = station
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(hit.display_name);

    let report = AirQualityReport::assemble(location, evaluation)
        .with_station_info(station.locality, station.last_updated);

    match &report.aqi {
        Some(aqi) => info!(
            location = %report.location,
            aqi = aqi.value,
            quality = %aqi.quality,
            dominant = %aqi.dominant,
            "Lookup complete"
        ),
        None => warn!(
            location = %report.location,
            readings = station.readings.len(),
            "No usable readings; reporting empty result"
        ),
    }

    Ok(report)
}
