use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Failed to fetch reference file '{file}': {reason}")]
    FetchError { file: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

impl LookupError {
    /// 參考資料無法取得（網路、檔案或 JSON 解析），呼叫端應降級為「無資料」
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LookupError::HttpError(_)
                | LookupError::IoError(_)
                | LookupError::SerializationError(_)
                | LookupError::FetchError { .. }
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LookupError::UrlError(_)
                | LookupError::ConfigError { .. }
                | LookupError::MissingConfigError { .. }
                | LookupError::InvalidConfigValueError { .. }
                | LookupError::ConfigValidationError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::HttpError(_) | LookupError::FetchError { .. } => {
                "Reference data could not be downloaded".to_string()
            }
            LookupError::IoError(_) => "Reference data could not be read from disk".to_string(),
            LookupError::SerializationError(_) => {
                "Reference data is not valid JSON".to_string()
            }
            LookupError::UrlError(e) => format!("The data source URL is invalid: {}", e),
            LookupError::ConfigError { message } => format!("Configuration problem: {}", message),
            LookupError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            LookupError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            LookupError::ConfigValidationError { field, message } => {
                format!("Invalid setting {}: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::HttpError(_) | LookupError::FetchError { .. } => {
                "Check that --source points at the json-database directory and the server is reachable"
            }
            LookupError::IoError(_) => "Check that the data directory exists and is readable",
            LookupError::SerializationError(_) => "Validate the reference JSON files",
            LookupError::UrlError(_) => "Use an absolute http(s) URL or a local directory path",
            _ => "Review the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
