//! Result assembly and rendering.
//!
//! The rendered document is a flat JSON object: one entry per scored
//! pollutant, then `AQI` and `location`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::index::{AirQualityIndex, Assessment, Evaluation, QualityLabel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    #[serde(flatten)]
    pub pollutants: BTreeMap<String, Assessment>,
    /// `null` when no reading could be scored.
    #[serde(rename = "AQI")]
    pub aqi: Option<AirQualityIndex>,
    pub location: String,
    #[serde(skip)]
    pub city: Option<String>,
    #[serde(skip)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl AirQualityReport {
    /// Builds the report from a calculator result and a display name.
    pub fn assemble(location: impl Into<String>, evaluation: Evaluation) -> Self {
        let pollutants = evaluation
            .assessments
            .into_values()
            .map(|a| (a.pollutant.id().to_string(), a))
            .collect();

        Self {
            pollutants,
            aqi: evaluation.index,
            location: location.into(),
            city: None,
            last_updated: None,
        }
    }

    pub fn with_station_info(
        mut self,
        city: Option<String>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        self.city = city;
        self.last_updated = last_updated;
        self
    }

    /// True when nothing could be scored.
    pub fn is_empty(&self) -> bool {
        self.pollutants.is_empty()
    }
}

/// Serializes the report as JSON, pretty-printed unless `compact`.
pub fn render(report: &AirQualityReport, compact: bool) -> Result<String> {
    debug!("{:#?}", report);
    let out = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(out)
}

/// Output of scoring a single value offline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedValue {
    pub pollutant: String,
    pub value: f64,
    pub unit: String,
    pub quality: QualityLabel,
    pub sub_index: u16,
}

impl From<Assessment> for ClassifiedValue {
    fn from(a: Assessment) -> Self {
        Self {
            pollutant: a.pollutant.id().to_string(),
            value: a.value,
            unit: a.unit,
            quality: a.quality,
            sub_index: a.sub_index,
        }
    }
}
