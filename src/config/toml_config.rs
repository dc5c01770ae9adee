use crate::core::ConfigProvider;
use crate::utils::error::{RnmError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    concat!("rnm-explorer/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RnmError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RnmError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_range("api.timeout_seconds", self.api.timeout_seconds, 1, 120)?;
        validation::validate_non_empty_string("api.user_agent", &self.api.user_agent)?;
        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.api.user_agent
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "http://localhost:8080/api"
timeout_seconds = 3

[logging]
level = "debug"
json = true
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "http://localhost:8080/api");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.user_agent().starts_with("rnm-explorer/"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config =
            ClientConfig::from_toml_str("[api]\nbase_url = \"https://example.com\"\n").unwrap();
        assert_eq!(config.api.timeout_seconds, 10);
        assert!(!config.logging.json);

        let default = ClientConfig::default();
        assert_eq!(default.base_url(), DEFAULT_BASE_URL);
        assert!(default.validate().is_ok());
    }

    #[test]
    fn test_missing_api_section_is_an_error() {
        assert!(matches!(
            ClientConfig::from_toml_str("[logging]\nlevel = \"info\"\n"),
            Err(RnmError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::default().with_base_url("invalid-url");
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"https://rickandmortyapi.com/api\"\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://rickandmortyapi.com/api");
    }
}
