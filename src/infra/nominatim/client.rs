use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::fetch::{HttpClient, base_url, fetch_json};
use crate::services::geocoder::{GeoPoint, GeocodeHit, Geocoder};

/// One entry of the `/search` response. Coordinates arrive as strings.
#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocodes postal codes with the OpenStreetMap Nominatim search API.
pub struct NominatimClient<C> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> NominatimClient<C> {
    pub fn new(client: C, base: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: base_url(base)?,
        })
    }

    fn search_url(&self, zip: &str, country: &str) -> Result<Url> {
        let mut url = self.base_url.join("search")?;
        url.query_pairs_mut()
            .append_pair("postalcode", zip)
            .append_pair("countrycodes", &country.to_ascii_lowercase())
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> Geocoder for NominatimClient<C> {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, zip: &str, country: &str) -> Result<Option<GeocodeHit>> {
        let url = self.search_url(zip, country)?;
        let places: Vec<Place> = fetch_json(&self.client, url).await?;

        let Some(place) = places.into_iter().next() else {
            debug!("No geocoding match");
            return Ok(None);
        };

        let latitude: f64 = place
            .lat
            .parse()
            .with_context(|| format!("Nominatim returned bad latitude '{}'", place.lat))?;
        let longitude: f64 = place
            .lon
            .parse()
            .with_context(|| format!("Nominatim returned bad longitude '{}'", place.lon))?;

        let point = GeoPoint {
            latitude,
            longitude,
        }
        .rounded();
        debug!(%point, display_name = %place.display_name, "Geocoded");

        Ok(Some(GeocodeHit {
            point,
            display_name: place.display_name,
        }))
    }
}
