//! Wire types for the parts of the OpenAQ v3 API we read.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// `GET /v3/locations` entry.
#[derive(Debug, Deserialize)]
pub(super) struct Location {
    pub id: i64,
    pub name: Option<String>,
    pub locality: Option<String>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    pub distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Sensor {
    pub id: i64,
    pub parameter: Parameter,
}

#[derive(Debug, Deserialize)]
pub(super) struct Parameter {
    pub name: String,
    pub units: String,
}

/// `GET /v3/locations/{id}/latest` entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Latest {
    pub datetime: Option<Timestamp>,
    /// Left untyped; validity is judged by the index calculator.
    #[serde(default)]
    pub value: Value,
    pub sensors_id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct Timestamp {
    pub utc: DateTime<Utc>,
}
