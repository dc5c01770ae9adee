use crate::domain::model::Character;
use crate::utils::error::RnmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerStatus {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "offline")]
    Offline,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "warning",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerStatus {
    type Err = RnmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OK" => Ok(Self::Ok),
            "warning" => Ok(Self::Warning),
            "offline" => Ok(Self::Offline),
            other => Err(RnmError::InvalidServerStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Process-wide UI state, created once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    /// Bumped to force re-evaluation of an otherwise identical view.
    pub randomizer_key: u64,
    pub is_loading_global: bool,
    pub server_status: ServerStatus,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rerandomize(&mut self) -> u64 {
        self.randomizer_key = self.randomizer_key.wrapping_add(1);
        self.randomizer_key
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading_global = loading;
    }

    pub fn set_server_status(&mut self, status: ServerStatus) {
        if self.server_status != status {
            tracing::debug!("server status {} -> {}", self.server_status, status);
        }
        self.server_status = status;
    }
}

/// Request lifecycle of one data feature. An empty `error` means no error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureState<T> {
    pub is_loading: bool,
    pub error: String,
    pub result: Option<T>,
}

impl<T> Default for FeatureState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: String::new(),
            result: None,
        }
    }
}

impl<T> FeatureState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.is_loading = true;
        self.error.clear();
    }

    pub fn succeed(&mut self, result: T) {
        self.is_loading = false;
        self.error.clear();
        self.result = Some(result);
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.is_loading = false;
        self.error = error.into();
        self.result = None;
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

pub type CharacterState = FeatureState<Character>;
