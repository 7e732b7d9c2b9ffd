use serde::Serialize;
use std::fmt;

/// Qualitative air quality, ordered from best to worst.
///
/// Every label owns a fixed, disjoint band of index values, so a higher
/// sub-index never carries a milder label:
///
/// | Label                          | Index   |
/// |--------------------------------|---------|
/// | Very Good                      | 0–25    |
/// | Good                           | 26–50   |
/// | Moderate                       | 51–100  |
/// | Unhealthy for Sensitive Groups | 101–150 |
/// | Unhealthy                      | 151–200 |
/// | Very Unhealthy                 | 201–300 |
/// | Hazardous                      | 301–500 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum QualityLabel {
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "Hazardous")]
    Hazardous,
}

impl QualityLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityLabel::VeryGood => "Very Good",
            QualityLabel::Good => "Good",
            QualityLabel::Moderate => "Moderate",
            QualityLabel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            QualityLabel::Unhealthy => "Unhealthy",
            QualityLabel::VeryUnhealthy => "Very Unhealthy",
            QualityLabel::Hazardous => "Hazardous",
        }
    }

    /// Inclusive index band for this label.
    pub fn band(self) -> (u16, u16) {
        match self {
            QualityLabel::VeryGood => (0, 25),
            QualityLabel::Good => (26, 50),
            QualityLabel::Moderate => (51, 100),
            QualityLabel::UnhealthyForSensitiveGroups => (101, 150),
            QualityLabel::Unhealthy => (151, 200),
            QualityLabel::VeryUnhealthy => (201, 300),
            QualityLabel::Hazardous => (301, 500),
        }
    }

    /// The label whose band contains `index`; anything above 500 is Hazardous.
    pub fn for_index(index: u16) -> Self {
        match index {
            0..=25 => QualityLabel::VeryGood,
            26..=50 => QualityLabel::Good,
            51..=100 => QualityLabel::Moderate,
            101..=150 => QualityLabel::UnhealthyForSensitiveGroups,
            151..=200 => QualityLabel::Unhealthy,
            201..=300 => QualityLabel::VeryUnhealthy,
            _ => QualityLabel::Hazardous,
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
