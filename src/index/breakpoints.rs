//! Breakpoint tables.
//!
//! Each table is contiguous: a range covers `[lo, hi)` and its `hi` is the
//! next range's `lo`. The final range is always Hazardous and its `hi` is the
//! ceiling; concentrations at or above it score the maximum index.

use super::label::QualityLabel;
use super::pollutant::Pollutant;
use serde::Serialize;

/// Highest index value any pollutant can produce.
pub const INDEX_CEILING: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub lo: f64,
    pub hi: f64,
    pub index_lo: u16,
    pub index_hi: u16,
    pub label: QualityLabel,
}

const fn bp(lo: f64, hi: f64, label: QualityLabel, index_lo: u16, index_hi: u16) -> Breakpoint {
    Breakpoint {
        lo,
        hi,
        index_lo,
        index_hi,
        label,
    }
}

use QualityLabel::*;

/// Fine particulate matter, µg/m³.
///
/// Starts at index 26, not 0: the lowest label here is Good, and Good owns
/// 26–50 in every table, above Very Good's 0–25.
static PM25: [Breakpoint; 7] = [
    bp(0.0, 12.1, Good, 26, 50),
    bp(12.1, 35.5, Moderate, 51, 100),
    bp(35.5, 55.5, UnhealthyForSensitiveGroups, 101, 150),
    bp(55.5, 150.5, Unhealthy, 151, 200),
    bp(150.5, 250.5, VeryUnhealthy, 201, 300),
    bp(250.5, 350.5, Hazardous, 301, 400),
    bp(350.5, 500.0, Hazardous, 401, 500),
];

/// Coarse particulate matter, µg/m³.
static PM10: [Breakpoint; 6] = [
    bp(0.0, 55.5, VeryGood, 0, 25),
    bp(55.5, 150.5, Good, 26, 50),
    bp(150.5, 250.5, UnhealthyForSensitiveGroups, 101, 150),
    bp(250.5, 350.5, Unhealthy, 151, 200),
    bp(350.5, 425.0, VeryUnhealthy, 201, 300),
    bp(425.0, 605.0, Hazardous, 301, 500),
];

/// Ozone, ppm.
static O3: [Breakpoint; 6] = [
    bp(0.0, 0.035, VeryGood, 0, 25),
    bp(0.035, 0.065, Good, 26, 50),
    bp(0.065, 0.095, Moderate, 51, 100),
    bp(0.095, 0.125, Unhealthy, 151, 200),
    bp(0.125, 0.405, VeryUnhealthy, 201, 300),
    bp(0.405, 0.605, Hazardous, 301, 500),
];

/// Nitrogen dioxide, ppm.
static NO2: [Breakpoint; 6] = [
    bp(0.0, 0.025, VeryGood, 0, 25),
    bp(0.025, 0.05, Good, 26, 50),
    bp(0.05, 0.1, Moderate, 51, 100),
    bp(0.1, 0.2, Unhealthy, 151, 200),
    bp(0.2, 1.25, VeryUnhealthy, 201, 300),
    bp(1.25, 2.05, Hazardous, 301, 500),
];

/// The breakpoint table for `pollutant`, in the unit given by
/// [`Pollutant::table_unit`].
pub fn table(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => &PM25,
        Pollutant::Pm10 => &PM10,
        Pollutant::O3 => &O3,
        Pollutant::No2 => &NO2,
    }
}
