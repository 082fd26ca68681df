use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Invalid coordinate: {message}")]
    InvalidCoordinate { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: String, id: String },

    #[error("Upstream request failed with status {status}: {message}")]
    UpstreamError { status: u16, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    NotFound,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GeoError {
    pub fn invalid_coordinate(message: impl Into<String>) -> Self {
        GeoError::InvalidCoordinate {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        GeoError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        GeoError::EntityNotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GeoError::InvalidCoordinate { .. } | GeoError::InvalidInput { .. } => {
                ErrorCategory::Input
            }
            GeoError::EntityNotFound { .. } => ErrorCategory::NotFound,
            GeoError::UpstreamError { .. } | GeoError::ApiError(_) => ErrorCategory::Network,
            GeoError::CsvError(_) | GeoError::SerializationError(_) => ErrorCategory::Data,
            GeoError::ConfigError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GeoError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::NotFound => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應 HTTP 狀態碼 (由外部 API 層使用)
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            ErrorCategory::NotFound => 404,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GeoError::InvalidCoordinate { .. } => {
                "Check that both listings have a location with longitude in [-180, 180] and latitude in [-90, 90]".to_string()
            }
            GeoError::InvalidInput { .. } => {
                "Check the request parameters and the [commute] section of the config".to_string()
            }
            GeoError::EntityNotFound { kind, .. } => {
                format!("Verify the {} id exists in the listing source", kind)
            }
            GeoError::UpstreamError { .. } | GeoError::ApiError(_) => {
                "Check that the listing API endpoint is reachable and retry".to_string()
            }
            GeoError::CsvError(_) | GeoError::SerializationError(_) => {
                "Check the listing data format (expected {\"properties\": [...], \"jobs\": [...]})".to_string()
            }
            GeoError::IoError(_) => "Check file paths and permissions".to_string(),
            GeoError::ConfigError { .. }
            | GeoError::InvalidConfigValueError { .. }
            | GeoError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoError::InvalidCoordinate { message } => {
                format!("Location data is missing or invalid: {}", message)
            }
            GeoError::InvalidInput { message } => format!("Invalid request: {}", message),
            GeoError::EntityNotFound { kind, id } => {
                format!("The requested {} ({}) was not found", kind, id)
            }
            GeoError::UpstreamError { status, .. } => {
                format!("The listing service responded with status {}", status)
            }
            GeoError::ApiError(_) => "Could not reach the listing service".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
