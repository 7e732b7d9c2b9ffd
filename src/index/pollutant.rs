use serde::Serialize;
use std::fmt;

/// The pollutants the calculator has breakpoint tables for.
///
/// Declaration order is the tie-break order for the aggregate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
    ];

    /// Maps an upstream parameter name onto a supported pollutant.
    /// Returns `None` for anything without a table (co, so2, bc, ...).
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "pm25" | "pm2.5" => Some(Pollutant::Pm25),
            "pm10" => Some(Pollutant::Pm10),
            "o3" => Some(Pollutant::O3),
            "no2" => Some(Pollutant::No2),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
        }
    }

    /// Unit the breakpoint table is expressed in.
    pub fn table_unit(self) -> Unit {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => Unit::MicrogramsPerCubicMeter,
            Pollutant::O3 | Pollutant::No2 => Unit::Ppm,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Concentration units understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    MicrogramsPerCubicMeter,
    Ppm,
    Ppb,
}

impl Unit {
    /// Accepts the spellings OpenAQ and users tend to produce:
    /// micro sign or Greek mu, superscript or plain 3.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['\u{b5}', '\u{3bc}'], "u")
            .replace('\u{b3}', "3");
        match normalized.as_str() {
            "ug/m3" => Some(Unit::MicrogramsPerCubicMeter),
            "ppm" => Some(Unit::Ppm),
            "ppb" => Some(Unit::Ppb),
            _ => None,
        }
    }

    /// Converts `value` from `self` into `target`, if the two are compatible.
    pub fn convert(self, value: f64, target: Unit) -> Option<f64> {
        match (self, target) {
            (a, b) if a == b => Some(value),
            (Unit::Ppb, Unit::Ppm) => Some(value / 1000.0),
            (Unit::Ppm, Unit::Ppb) => Some(value * 1000.0),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::MicrogramsPerCubicMeter => "µg/m³",
            Unit::Ppm => "ppm",
            Unit::Ppb => "ppb",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
