//! Runtime settings for the external services.
//!
//! Every setting can come from a flag or the environment (a `.env` file is
//! loaded at startup).

use anyhow::{Result, bail};
use clap::Args;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("zip_air_quality/", env!("CARGO_PKG_VERSION"));

/// OpenAQ accepts search radii up to 25 km.
pub const MAX_RADIUS_M: u32 = 25_000;

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// OpenAQ v3 API key
    #[arg(long, env = "OPENAQ_API_KEY", hide_env_values = true)]
    pub openaq_api_key: Option<String>,

    /// OpenAQ API base URL
    #[arg(long, env = "OPENAQ_BASE_URL", default_value = "https://api.openaq.org")]
    pub openaq_base_url: String,

    /// Nominatim base URL
    #[arg(long, env = "NOMINATIM_BASE_URL", default_value = "https://nominatim.openstreetmap.org")]
    pub nominatim_base_url: String,

    /// User-Agent sent with every request (required by Nominatim's usage policy)
    #[arg(long, env = "NOMINATIM_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Station search radius in meters
    #[arg(long, env = "SEARCH_RADIUS_M", default_value_t = 10_000)]
    pub radius_m: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Settings {
    /// Checks everything that can be checked before touching the network
    /// and returns the OpenAQ key.
    pub fn validate(&self) -> Result<&str> {
        if self.radius_m == 0 || self.radius_m > MAX_RADIUS_M {
            bail!("search radius must be between 1 and {MAX_RADIUS_M} m, got {}", self.radius_m);
        }
        if self.timeout_secs == 0 {
            bail!("HTTP timeout must be at least one second");
        }
        if self.user_agent.trim().is_empty() {
            bail!("a User-Agent is required");
        }
        match self.openaq_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("OPENAQ_API_KEY must be set (flag --openaq-api-key or environment)"),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        settings: Settings,
    }

    fn parse(args: &[&str]) -> Settings {
        let mut argv = vec!["test", "--openaq-api-key", "k"];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().settings
    }

    #[test]
    fn test_defaults() {
        let s = parse(&[]);
        assert_eq!(s.validate().unwrap(), "k");
        assert_eq!(s.timeout(), Duration::from_secs(30));
        assert_eq!(s.radius_m, 10_000);
        assert!(s.user_agent.starts_with("zip_air_quality/"));
    }

    #[test]
    fn test_rejects_radius() {
        assert!(parse(&["--radius-m", "0"]).validate().is_err());
        assert!(parse(&["--radius-m", "25001"]).validate().is_err());
        assert!(parse(&["--radius-m", "25000"]).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(parse(&["--timeout-secs", "0"]).validate().is_err());
    }

    #[test]
    fn test_requires_key() {
        let mut s = parse(&[]);
        s.openaq_api_key = Some("  ".into());
        assert!(s.validate().is_err());
        s.openaq_api_key = None;
        assert!(s.validate().is_err());
    }
}
