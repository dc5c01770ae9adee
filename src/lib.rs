pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpRnmApi;
pub use config::toml_config::ClientConfig;
pub use crate::core::loader::FeatureLoader;
pub use crate::core::parse::parse_response;
pub use domain::model::{
    ApiEntry, ApiFailure, ApiInfo, ApiQuery, Character, CharactersApiResponse, EntityRef, Entry,
    Episode, EpisodeCode, Location, ResponseKind, RnmApiResponse,
};
pub use domain::state::{ApplicationState, CharacterState, FeatureState, ServerStatus};
pub use utils::error::{RnmError, Result};
