use clap::Parser;
use geo_commute::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use geo_commute::app::handlers::{self, FailedRequest};
use geo_commute::app::output::{self, DistanceOutput, OutputFormat};
use geo_commute::config::{Command, SourceKind};
use geo_commute::core::ListingSource;
use geo_commute::domain::ports::Storage;
use geo_commute::utils::error::ErrorSeverity;
use geo_commute::utils::{logger, validation::Validate};
use geo_commute::{
    estimate_commute, haversine_distance_km, CliConfig, CommuteQuery, CommuteService, GeoError,
    HttpListingSource, JsonFileListingSource, LocalStorage, TomlConfig,
};

type CommandResult = std::result::Result<String, FailedRequest>;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting geo-commute CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&cli, &config).await {
        Ok(rendered) => {
            emit(&cli, &rendered).await?;
        }
        Err(FailedRequest { error: e, body }) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // JSON 輸出時錯誤內容與 API 回應格式一致
            if let Some(body) = body {
                if let Err(emit_error) = emit(&cli, &body).await {
                    tracing::error!("❌ Failed to write error response: {}", emit_error);
                }
            }

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn emit(cli: &CliConfig, rendered: &str) -> geo_commute::Result<()> {
    match &cli.output {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .and_then(|p| p.to_str())
                .filter(|p| !p.is_empty())
                .unwrap_or(".");
            let file_name = path
                .file_name()
                .and_then(|f| f.to_str())
                .ok_or_else(|| GeoError::invalid_input("output path has no file name"))?;

            LocalStorage::new(dir)
                .write_file(file_name, rendered.as_bytes())
                .await?;
            tracing::info!("📁 Output saved to: {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> CommandResult {
    match &cli.command {
        Command::Distance { from, to } => {
            let distance_km = haversine_distance_km(from, to)?;
            Ok(output::render_distance(
                &DistanceOutput {
                    from: *from,
                    to: *to,
                    distance_km,
                },
                cli.format,
            )?)
        }
        Command::Estimate { distance_km } => {
            let estimate = estimate_commute(*distance_km, &config.commute)?;
            Ok(output::render_estimate(&estimate, cli.format)?)
        }
        command => {
            let source = config.source.as_ref().ok_or_else(|| GeoError::MissingConfigError {
                field: "source (use --listings, --endpoint or a [source] section)".to_string(),
            })?;

            match source.r#type {
                SourceKind::File => {
                    let path = source.path.as_deref().unwrap_or_default();
                    let listings =
                        JsonFileListingSource::load(&LocalStorage::new("."), path).await?;
                    let service = CommuteService::from_config(listings, config);
                    run_listing_command(command, &service, cli.format).await
                }
                SourceKind::Http => {
                    let endpoint = source.endpoint.as_deref().unwrap_or_default();
                    let timeout = Duration::from_secs(
                        source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
                    );
                    let listings = HttpListingSource::new(endpoint, timeout)?;
                    let service = CommuteService::from_config(listings, config);
                    let result = run_listing_command(command, &service, cli.format).await;
                    service.source().shutdown().await;
                    result
                }
            }
        }
    }
}

async fn run_listing_command<S: ListingSource>(
    command: &Command,
    service: &CommuteService<S>,
    format: OutputFormat,
) -> CommandResult {
    match command {
        Command::Commute {
            property_id,
            job_id,
        } => {
            if format == OutputFormat::Json {
                // JSON 輸出與 API 回應格式一致
                let mut params = HashMap::new();
                params.insert("property_id".to_string(), property_id.clone());
                params.insert("job_id".to_string(), job_id.clone());
                return handlers::commute_json(service, &params).await;
            }

            let query = CommuteQuery::new(property_id.as_str(), job_id.as_str())?;
            let report = service.compare(&query).await?;
            Ok(output::render_report(&report, format)?)
        }
        Command::NearestJobs { property_id, limit } => {
            let listings = service.nearest_jobs(property_id, *limit).await?;
            Ok(output::render_nearby(&listings, format)?)
        }
        Command::NearestProperties { job_id, limit } => {
            let listings = service.nearest_properties(job_id, *limit).await?;
            Ok(output::render_nearby(&listings, format)?)
        }
        Command::Distance { .. } | Command::Estimate { .. } => {
            Err(GeoError::invalid_input("command does not read listings").into())
        }
    }
}
