use crate::domain::state::ServerStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RnmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded with {status}: {message}")]
    Api { status: u16, message: String },

    /// A successful response whose body was the API's error text rather than a record.
    #[error("API reported: {message}")]
    ApiReported { message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Invalid episode code '{code}', expected S##E##")]
    InvalidEpisodeCode { code: String },

    #[error("Invalid server status '{value}', expected OK, warning or offline")]
    InvalidServerStatus { value: String },
}

pub type Result<T> = std::result::Result<T, RnmError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
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

impl RnmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RnmError::Http(_) => ErrorCategory::Network,
            RnmError::Api { .. } | RnmError::ApiReported { .. } => ErrorCategory::Api,
            RnmError::Csv(_)
            | RnmError::Serialization(_)
            | RnmError::Validation { .. }
            | RnmError::InvalidEpisodeCode { .. }
            | RnmError::InvalidServerStatus { .. } => ErrorCategory::Data,
            RnmError::UrlParse(_)
            | RnmError::ConfigValidationError { .. }
            | RnmError::InvalidConfigValueError { .. }
            | RnmError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RnmError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RnmError::Http(_) => ErrorSeverity::Medium,
            RnmError::Api { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            RnmError::Api { .. } | RnmError::ApiReported { .. } => ErrorSeverity::High,
            RnmError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Connectivity status implied by this error, if it says anything about
    /// the server at all.
    pub fn server_status(&self) -> Option<ServerStatus> {
        match self {
            RnmError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
                Some(ServerStatus::Offline)
            }
            RnmError::Http(_) => Some(ServerStatus::Warning),
            RnmError::Api { status, .. } if *status >= 500 => Some(ServerStatus::Warning),
            RnmError::Api { .. } | RnmError::ApiReported { .. } => Some(ServerStatus::Ok),
            // The server answered, but with a body that doesn't fit the contract.
            RnmError::Serialization(_) | RnmError::Validation { .. } => {
                Some(ServerStatus::Warning)
            }
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RnmError::Http(_) => "Could not reach the Rick and Morty API".to_string(),
            RnmError::Api { message, .. } | RnmError::ApiReported { message }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            RnmError::Api { .. } | RnmError::ApiReported { .. } => {
                "The API rejected the request".to_string()
            }
            RnmError::Serialization(_) | RnmError::Validation { .. } => {
                "The API returned data in an unexpected shape".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the configured base URL",
            ErrorCategory::Api => "Check the requested id or filters and try again",
            ErrorCategory::Data => "Inspect the payload; the API schema may have changed",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}
