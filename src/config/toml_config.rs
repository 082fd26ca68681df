use crate::core::geo::DEFAULT_NEAREST_LIMIT;
use crate::domain::model::CommuteParams;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub commute: CommuteParams,
    pub ranking: RankingConfig,
    pub source: Option<SourceConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub nearest_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            nearest_limit: DEFAULT_NEAREST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: SourceKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl SourceConfig {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            r#type: SourceKind::File,
            path: Some(path.into()),
            endpoint: None,
            timeout_seconds: None,
        }
    }

    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            r#type: SourceKind::Http,
            path: None,
            endpoint: Some(endpoint.into()),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GeoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GeoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LISTINGS_API_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GeoError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let commute = &self.commute;
        validation::validate_range(
            "commute.average_speed_kmh",
            commute.average_speed_kmh,
            f64::MIN_POSITIVE,
            f64::MAX,
        )?;
        validation::validate_range("commute.cost_per_km", commute.cost_per_km, 0.0, f64::MAX)?;
        validation::validate_range(
            "commute.working_days_per_month",
            commute.working_days_per_month,
            0,
            31,
        )?;
        validation::validate_range("commute.months_per_year", commute.months_per_year, 1, 12)?;
        validation::validate_range(
            "commute.round_trip_factor",
            commute.round_trip_factor,
            0.0,
            f64::MAX,
        )?;
        validation::validate_range(
            "commute.score_time_weight",
            commute.score_time_weight,
            0.0,
            f64::MAX,
        )?;

        validation::validate_positive_number("ranking.nearest_limit", self.ranking.nearest_limit, 1)?;

        if let Some(source) = &self.source {
            match source.r#type {
                SourceKind::File => {
                    let path = validation::validate_required_field("source.path", &source.path)?;
                    validation::validate_non_empty_string("source.path", path)?;
                    validation::validate_path("source.path", path)?;
                    validation::validate_file_extension("source.path", path, &["json"])?;
                }
                SourceKind::Http => {
                    let endpoint =
                        validation::validate_required_field("source.endpoint", &source.endpoint)?;
                    validation::validate_non_empty_string("source.endpoint", endpoint)?;
                    validation::validate_url("source.endpoint", endpoint)?;
                }
            }

            if let Some(timeout) = source.timeout_seconds {
                validation::validate_positive_number("source.timeout_seconds", timeout as usize, 1)?;
            }
        }

        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(GeoError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn commute_params(&self) -> &CommuteParams {
        &self.commute
    }

    fn nearest_limit(&self) -> usize {
        self.ranking.nearest_limit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
