use crate::app::output::OutputFormat;
use crate::config::toml_config::{SourceConfig, TomlConfig};
use crate::domain::model::GeoPoint;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-commute")]
#[command(about = "Distance, nearest listings and commute savings between properties and jobs")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// JSON file with {"properties": [...], "jobs": [...]}
    #[arg(long, global = true, conflicts_with = "endpoint")]
    pub listings: Option<String>,

    /// Base URL of the listing API (serves /api/properties and /api/jobs)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the result to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Great-circle distance between two LON,LAT points
    Distance {
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
    },
    /// Commute estimate for a raw distance in km
    Estimate {
        #[arg(long, allow_hyphen_values = true)]
        distance_km: f64,
    },
    /// Commute estimate between a property and a job
    Commute {
        #[arg(long)]
        property_id: String,
        #[arg(long)]
        job_id: String,
    },
    /// Jobs nearest to a property
    NearestJobs {
        #[arg(long)]
        property_id: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Properties nearest to a job
    NearestProperties {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// 解析 `LON,LAT`
pub fn parse_point(value: &str) -> Result<GeoPoint, String> {
    let (lon, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LON,LAT, got '{}'", value))?;

    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{}': {}", lon, e))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{}': {}", lat, e))?;

    Ok(GeoPoint { lon, lat })
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.listings {
            config.source = Some(SourceConfig::file(path.clone()));
        } else if let Some(endpoint) = &self.endpoint {
            let timeout_seconds = config.source.as_ref().and_then(|s| s.timeout_seconds);
            config.source = Some(SourceConfig {
                timeout_seconds,
                ..SourceConfig::http(endpoint.clone())
            });
        }
    }
}
