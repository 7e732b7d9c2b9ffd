use thiserror::Error;

/// Ways a postal-code lookup can fail.
///
/// Malformed readings are not here: the calculator excludes them and
/// reports each as an [`crate::index::InvalidReading`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no location found for postal code {zip} ({country})")]
    GeocodeNotFound { zip: String, country: String },

    #[error("no air-quality station near {latitude},{longitude}")]
    NoStationFound { latitude: f64, longitude: f64 },

    #[error("geocoding request failed")]
    Geocoder(#[source] anyhow::Error),

    #[error("air-quality request failed")]
    AirQualityApi(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = LookupError::GeocodeNotFound {
            zip: "00000".into(),
            country: "US".into(),
        };
        assert_eq!(e.to_string(), "no location found for postal code 00000 (US)");

        let e = LookupError::NoStationFound {
            latitude: 40.099,
            longitude: -75.384,
        };
        assert_eq!(e.to_string(), "no air-quality station near 40.099,-75.384");
    }

    #[test]
    fn test_upstream_keeps_cause() {
        let e = LookupError::AirQualityApi(anyhow::anyhow!("status 401"));
        let chain = format!("{:#}", anyhow::Error::from(e));
        assert!(chain.contains("air-quality request failed"), "{chain}");
        assert!(chain.contains("status 401"), "{chain}");
    }
}
