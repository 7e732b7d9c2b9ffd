use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use std::collections::HashMap;
use tracing::{debug, info};

use super::types::{Latest, Location, Page};
use crate::fetch::{HttpClient, base_url, fetch_json};
use crate::index::RawReading;
use crate::services::air_quality_api::{AirQualitySource, StationReadings};
use crate::services::geocoder::GeoPoint;

/// Reads the nearest station's latest measurements from OpenAQ v3.
///
/// Wrap the transport in [`crate::fetch::auth::ApiKey::openaq`]; v3 rejects
/// unauthenticated requests.
pub struct OpenAqClient<C> {
    client: C,
    base_url: Url,
    radius_m: u32,
}

impl<C: HttpClient> OpenAqClient<C> {
    pub fn new(client: C, base: &str, radius_m: u32) -> Result<Self> {
        Ok(Self {
            client,
            base_url: base_url(base)?,
            radius_m,
        })
    }

    async fn nearest_location(&self, point: GeoPoint) -> Result<Option<Location>> {
        let mut url = self.base_url.join("v3/locations")?;
        url.query_pairs_mut()
            .append_pair("coordinates", &point.to_string())
            .append_pair("radius", &self.radius_m.to_string())
            .append_pair("limit", "1");

        let page: Page<Location> = fetch_json(&self.client, url).await?;
        Ok(page.results.into_iter().next())
    }

    async fn latest(&self, location_id: i64) -> Result<Vec<Latest>> {
        let url = self
            .base_url
            .join(&format!("v3/locations/{location_id}/latest"))?;
        let page: Page<Latest> = fetch_json(&self.client, url).await?;
        Ok(page.results)
    }
}

/// Joins latest values to their sensors' parameter and unit. When a
/// parameter shows up more than once, the most recent value wins.
fn collect_readings(
    location: &Location,
    latest: Vec<Latest>,
) -> (Vec<RawReading>, Option<DateTime<Utc>>) {
    let sensors: HashMap<i64, _> = location
        .sensors
        .iter()
        .map(|s| (s.id, &s.parameter))
        .collect();

    let mut readings: Vec<(RawReading, Option<DateTime<Utc>>)> = Vec::new();
    let mut last_updated: Option<DateTime<Utc>> = None;

    for entry in latest {
        let Some(parameter) = sensors.get(&entry.sensors_id) else {
            debug!(sensor_id = entry.sensors_id, "Latest value for unknown sensor skipped");
            continue;
        };
        let at = entry.datetime.map(|t| t.utc);
        last_updated = last_updated.max(at);

        let reading = RawReading::new(parameter.name.clone(), entry.value, parameter.units.clone());
        match readings.iter_mut().find(|(r, _)| r.parameter == reading.parameter) {
            Some(slot) if slot.1 < at => *slot = (reading, at),
            Some(_) => {}
            None => readings.push((reading, at)),
        }
    }

    (readings.into_iter().map(|(r, _)| r).collect(), last_updated)
}

#[async_trait]
impl<C: HttpClient> AirQualitySource for OpenAqClient<C> {
    #[tracing::instrument(skip(self), fields(point = %point, radius_m = self.radius_m))]
    async fn nearest_readings(&self, point: GeoPoint) -> Result<Option<StationReadings>> {
        let Some(location) = self.nearest_location(point).await? else {
            debug!("No station within radius");
            return Ok(None);
        };

        info!(
            station_id = location.id,
            station = location.name.as_deref().unwrap_or(""),
            distance_m = location.distance,
            sensors = location.sensors.len(),
            "Nearest station found"
        );

        let latest = self.latest(location.id).await?;
        let (readings, last_updated) = collect_readings(&location, latest);

        Ok(Some(StationReadings {
            station_id: location.id,
            name: location.name,
            locality: location.locality,
            last_updated,
            readings,
        }))
    }
}
