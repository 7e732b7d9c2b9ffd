//! CLI entry point for zip_air_quality.
//!
//! `lookup` reports air quality for a postal code; `classify` and
//! `breakpoints` expose the index calculator offline.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use zip_air_quality::{
    config::Settings,
    fetch::{BasicClient, auth::ApiKey},
    index::{self, Pollutant, RawReading},
    infra::{nominatim::NominatimClient, openaq::OpenAqClient},
    lookup_by_zip,
    report::{ClassifiedValue, render},
};

#[derive(Parser)]
#[command(name = "zip_air_quality", version)]
#[command(about = "Air quality index for a postal code", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up current air quality near a postal code
    Lookup {
        /// Postal code to resolve
        #[arg(value_name = "ZIP")]
        zip: String,

        /// ISO 3166-1 alpha-2 country code
        #[arg(short, long, default_value = "US")]
        country: String,

        /// Print the document on one line
        #[arg(long, default_value_t = false)]
        compact: bool,

        #[command(flatten)]
        settings: Settings,
    },
    /// Score a single concentration without any network access
    Classify {
        /// Pollutant identifier (pm25, pm10, o3, no2)
        pollutant: String,

        /// Concentration value
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Unit of the value; defaults to the pollutant's table unit
        #[arg(short, long)]
        unit: Option<String>,
    },
    /// Print breakpoint tables as JSON
    Breakpoints {
        /// Only this pollutant
        pollutant: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file. stdout carries the result.
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/zip_air_quality.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("zip_air_quality.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup {
            zip,
            country,
            compact,
            settings,
        } => {
            let api_key = settings.validate()?;

            let geocoder = NominatimClient::new(
                BasicClient::with_settings(settings.timeout(), &settings.user_agent)?,
                &settings.nominatim_base_url,
            )?;
            let source = OpenAqClient::new(
                ApiKey::openaq(
                    BasicClient::with_settings(settings.timeout(), &settings.user_agent)?,
                    api_key,
                )?,
                &settings.openaq_base_url,
                settings.radius_m,
            )?;

            let report = match lookup_by_zip(&geocoder, &source, &zip, &country).await {
                Ok(report) => report,
                Err(e) => {
                    error!(zip = %zip, country = %country, error = %e, "Lookup failed");
                    return Err(e.into());
                }
            };

            if let Some(updated) = report.last_updated {
                info!(
                    city = report.city.as_deref().unwrap_or(""),
                    last_updated = %updated,
                    "Station data"
                );
            }
            println!("{}", render(&report, compact)?);
        }
        Commands::Classify {
            pollutant,
            value,
            unit,
        } => {
            let known = Pollutant::from_id(&pollutant)
                .ok_or_else(|| anyhow!("unsupported pollutant '{pollutant}'"))?;
            let unit = unit.unwrap_or_else(|| known.table_unit().symbol().to_string());

            let reading = RawReading::new(pollutant.as_str(), Value::String(value), unit);
            let assessment = index::assess(&reading)?
                .ok_or_else(|| anyhow!("unsupported pollutant '{pollutant}'"))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&ClassifiedValue::from(assessment))?
            );
        }
        Commands::Breakpoints { pollutant } => {
            let tables: Vec<Pollutant> = match pollutant {
                Some(id) => vec![
                    Pollutant::from_id(&id)
                        .with_context(|| format!("unsupported pollutant '{id}'"))?,
                ],
                None => Pollutant::ALL.to_vec(),
            };

            let doc: serde_json::Map<String, Value> = tables
                .into_iter()
                .map(|p| -> Result<(String, Value)> {
                    let ranges = serde_json::to_value(index::table(p))?;
                    let entry = serde_json::json!({
                        "unit": p.table_unit().symbol(),
                        "ranges": ranges,
                    });
                    Ok((p.id().to_string(), entry))
                })
                .collect::<Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    Ok(())
}
