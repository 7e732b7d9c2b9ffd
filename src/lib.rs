//! Air quality by postal code.
//!
//! Geocodes a postal code, fetches the nearest monitoring station's latest
//! readings, and scores each pollutant against fixed breakpoint tables to
//! produce per-pollutant labels and an aggregate air quality index.

pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod infra;
pub mod lookup;
pub mod report;
pub mod services;

pub use error::LookupError;
pub use lookup::lookup_by_zip;
pub use report::AirQualityReport;
