//! Concentration-to-index mapping.
//!
//! Readings are located in a per-pollutant breakpoint table to get a
//! [`QualityLabel`] and a sub-index; the aggregate index is the largest
//! sub-index among the readings, carrying that reading's label.

pub mod breakpoints;
mod label;
mod pollutant;

pub use breakpoints::{Breakpoint, INDEX_CEILING, table};
pub use label::QualityLabel;
pub use pollutant::{Pollutant, Unit};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// A reading that could not be scored.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid reading for {parameter}: {reason}")]
pub struct InvalidReading {
    pub parameter: String,
    pub reason: String,
}

impl InvalidReading {
    fn new(parameter: &str, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

/// One pollutant measurement as reported upstream.
///
/// The value is kept as raw JSON; validation happens when it is scored.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub parameter: String,
    pub value: Value,
    pub unit: String,
}

impl RawReading {
    pub fn new(
        parameter: impl Into<String>,
        value: impl Into<Value>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
            unit: unit.into(),
        }
    }
}

/// Where a concentration lands in its table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: QualityLabel,
    pub sub_index: u16,
}

/// A scored reading, keeping the value and unit as they were reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(skip)]
    pub pollutant: Pollutant,
    pub value: f64,
    pub unit: String,
    pub quality: QualityLabel,
    #[serde(skip)]
    pub sub_index: u16,
}

/// The aggregate index for a set of readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQualityIndex {
    pub value: u16,
    pub quality: QualityLabel,
    #[serde(skip)]
    pub dominant: Pollutant,
}

/// Everything the calculator derived from a reading set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub assessments: BTreeMap<Pollutant, Assessment>,
    pub rejected: Vec<InvalidReading>,
    pub index: Option<AirQualityIndex>,
}

/// Locates `concentration` (already in the table's unit) in the table for
/// `pollutant`.
///
/// Ranges are lower-inclusive. Values below the first range score its lower
/// index; values at or above the ceiling score [`INDEX_CEILING`].
pub fn classify(pollutant: Pollutant, concentration: f64) -> Classification {
    let ranges = table(pollutant);
    let first = ranges[0];
    let last = ranges[ranges.len() - 1];

    if concentration.is_nan() || concentration < first.lo {
        return Classification {
            label: first.label,
            sub_index: first.index_lo,
        };
    }
    if concentration >= last.hi {
        return Classification {
            label: last.label,
            sub_index: INDEX_CEILING,
        };
    }

    let range = ranges
        .iter()
        .rev()
        .find(|b| concentration >= b.lo)
        .unwrap_or(&first);

    let sub_index = interpolate(range, concentration);
    debug_assert_eq!(QualityLabel::for_index(sub_index), range.label);
    Classification {
        label: range.label,
        sub_index,
    }
}

fn interpolate(range: &Breakpoint, concentration: f64) -> u16 {
    let index_span = f64::from(range.index_hi - range.index_lo);
    let fraction = (concentration - range.lo) / (range.hi - range.lo);
    let index = (f64::from(range.index_lo) + index_span * fraction).round();
    index.clamp(f64::from(range.index_lo), f64::from(range.index_hi)) as u16
}

/// Pulls a finite number out of a raw JSON value. Numeric strings are
/// accepted; null, booleans, objects and non-finite numbers are not.
fn numeric_value(parameter: &str, value: &Value) -> Result<f64, InvalidReading> {
    let number = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| InvalidReading::new(parameter, format!("{n} is not representable")))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidReading::new(parameter, format!("'{s}' is not a number")))?,
        Value::Null => return Err(InvalidReading::new(parameter, "value is missing")),
        other => {
            return Err(InvalidReading::new(
                parameter,
                format!("{other} is not a number"),
            ));
        }
    };

    if !number.is_finite() {
        return Err(InvalidReading::new(parameter, format!("{number} is not finite")));
    }
    Ok(number)
}

/// Scores a single raw reading.
///
/// `Ok(None)` means the parameter is not one we have a table for; such
/// readings are skipped rather than treated as errors.
pub fn assess(reading: &RawReading) -> Result<Option<Assessment>, InvalidReading> {
    let Some(pollutant) = Pollutant::from_id(&reading.parameter) else {
        return Ok(None);
    };

    let value = numeric_value(&reading.parameter, &reading.value)?;
    let unit = Unit::parse(&reading.unit).ok_or_else(|| {
        InvalidReading::new(&reading.parameter, format!("unknown unit '{}'", reading.unit))
    })?;
    let concentration = unit.convert(value, pollutant.table_unit()).ok_or_else(|| {
        InvalidReading::new(
            &reading.parameter,
            format!("cannot express {unit} as {}", pollutant.table_unit()),
        )
    })?;

    let Classification { label, sub_index } = classify(pollutant, concentration);
    Ok(Some(Assessment {
        pollutant,
        value,
        unit: reading.unit.clone(),
        quality: label,
        sub_index,
    }))
}

/// Picks the largest sub-index. Ties go to the pollutant declared first.
pub fn aggregate<'a, I>(assessments: I) -> Option<AirQualityIndex>
where
    I: IntoIterator<Item = &'a Assessment>,
{
    let mut best: Option<&Assessment> = None;
    for a in assessments {
        best = match best {
            Some(b) if (b.sub_index, std::cmp::Reverse(b.pollutant))
                >= (a.sub_index, std::cmp::Reverse(a.pollutant)) =>
            {
                Some(b)
            }
            _ => Some(a),
        };
    }

    best.map(|a| AirQualityIndex {
        value: a.sub_index,
        quality: a.quality,
        dominant: a.pollutant,
    })
}

/// Scores a whole reading set.
///
/// Unsupported parameters are dropped; invalid readings are dropped and
/// collected in [`Evaluation::rejected`]. If nothing survives, there is no
/// aggregate index.
pub fn evaluate<'a, I>(readings: I) -> Evaluation
where
    I: IntoIterator<Item = &'a RawReading>,
{
    let mut evaluation = Evaluation::default();

    for reading in readings {
        match assess(reading) {
            Ok(Some(assessment)) => {
                debug!(
                    pollutant = %assessment.pollutant,
                    value = assessment.value,
                    sub_index = assessment.sub_index,
                    quality = %assessment.quality,
                    "Reading scored"
                );
                if let Some(previous) = evaluation
                    .assessments
                    .insert(assessment.pollutant, assessment)
                {
                    debug!(pollutant = %previous.pollutant, "Duplicate reading replaced");
                }
            }
            Ok(None) => debug!(parameter = %reading.parameter, "Unsupported pollutant skipped"),
            Err(e) => {
                warn!(parameter = %e.parameter, reason = %e.reason, "Invalid reading excluded");
                evaluation.rejected.push(e);
            }
        }
    }

    evaluation.index = aggregate(evaluation.assessments.values());
    evaluation
}
