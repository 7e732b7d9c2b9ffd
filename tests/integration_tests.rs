use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use zip_air_quality::index::{QualityLabel, RawReading};
use zip_air_quality::services::{AirQualitySource, GeoPoint, GeocodeHit, Geocoder, StationReadings};
use zip_air_quality::{LookupError, lookup_by_zip};

struct FixedGeocoder(Option<GeocodeHit>);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _zip: &str, _country: &str) -> Result<Option<GeocodeHit>> {
        Ok(self.0.clone())
    }
}

struct FixedStation {
    station: Option<StationReadings>,
    calls: AtomicUsize,
}

impl FixedStation {
    fn new(station: Option<StationReadings>) -> Self {
        Self {
            station,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AirQualitySource for FixedStation {
    async fn nearest_readings(&self, _point: GeoPoint) -> Result<Option<StationReadings>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.station.clone())
    }
}

struct FailingSource;

#[async_trait]
impl AirQualitySource for FailingSource {
    async fn nearest_readings(&self, _point: GeoPoint) -> Result<Option<StationReadings>> {
        Err(anyhow::anyhow!("status 401"))
    }
}

fn king_of_prussia() -> FixedGeocoder {
    FixedGeocoder(Some(GeocodeHit {
        point: GeoPoint {
            latitude: 40.099,
            longitude: -75.384,
        },
        display_name: "King of Prussia, Montgomery County, Pennsylvania, 19406, United States"
            .to_string(),
    }))
}

fn station(name: Option<&str>, readings: Vec<RawReading>) -> StationReadings {
    StationReadings {
        station_id: 1234,
        name: name.map(str::to_string),
        locality: Some("Norristown".into()),
        last_updated: None,
        readings,
    }
}

#[tokio::test]
async fn test_documented_example() {
    let source = FixedStation::new(Some(station(
        Some("Norristown"),
        vec![
            RawReading::new("o3", 0.030, "ppm"),
            RawReading::new("pm25", 12.2, "µg/m³"),
        ],
    )));

    let report = lookup_by_zip(&king_of_prussia(), &source, "19406", "US")
        .await
        .expect("lookup failed");

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "o3": {"value": 0.030, "unit": "ppm", "quality": "Very Good"},
            "pm25": {"value": 12.2, "unit": "µg/m³", "quality": "Moderate"},
            "AQI": {"value": 51, "quality": "Moderate"},
            "location": "Norristown"
        })
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_geocode_not_found() {
    let source = FixedStation::new(None);
    let err = lookup_by_zip(&FixedGeocoder(None), &source, "00000", "US")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::GeocodeNotFound { ref zip, .. } if zip == "00000"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_station_found() {
    let err = lookup_by_zip(&king_of_prussia(), &FixedStation::new(None), "19406", "US")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::NoStationFound { latitude, .. } if latitude == 40.099));
}

#[tokio::test]
async fn test_upstream_failure_surfaces() {
    let err = lookup_by_zip(&king_of_prussia(), &FailingSource, "19406", "US")
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::AirQualityApi(_)));
}

#[tokio::test]
async fn test_all_invalid_readings_give_empty_result() {
    let source = FixedStation::new(Some(station(
        Some("Norristown"),
        vec![
            RawReading::new("pm25", "offline", "µg/m³"),
            RawReading::new("o3", Value::Null, "ppm"),
        ],
    )));

    let report = lookup_by_zip(&king_of_prussia(), &source, "19406", "US")
        .await
        .unwrap();
    assert!(report.is_empty());
    assert_eq!(report.aqi, None);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"AQI": null, "location": "Norristown"})
    );
}

#[tokio::test]
async fn test_unrecognized_pollutant_excluded() {
    let source = FixedStation::new(Some(station(
        Some("Norristown"),
        vec![
            RawReading::new("co", 0.4, "ppm"),
            RawReading::new("no2", 0.06, "ppm"),
            RawReading::new("pm10", 20.0, "µg/m³"),
        ],
    )));

    let report = lookup_by_zip(&king_of_prussia(), &source, "19406", "US")
        .await
        .unwrap();
    assert!(!report.pollutants.contains_key("co"));
    assert_eq!(report.pollutants.len(), 2);

    let aqi = report.aqi.unwrap();
    assert_eq!(aqi.quality, QualityLabel::Moderate);
    assert_eq!(aqi.quality, report.pollutants["no2"].quality);
}

#[tokio::test]
async fn test_unnamed_station_uses_geocoded_name() {
    let readings = vec![RawReading::new("pm25", 5.0, "µg/m³")];
    let source = FixedStation::new(Some(station(None, readings)));
    let report = lookup_by_zip(&king_of_prussia(), &source, "19406", "US")
        .await
        .unwrap();
    assert!(report.location.starts_with("King of Prussia"));
    assert_eq!(report.aqi.unwrap().quality, QualityLabel::Good);
}
