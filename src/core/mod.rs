pub mod export;
pub mod loader;
pub mod parse;

pub use crate::domain::model::{
    ApiQuery, Character, CharactersApiResponse, Episode, Location, RnmApiResponse,
};
pub use crate::domain::ports::{ConfigProvider, RnmApi};
pub use crate::domain::state::{ApplicationState, CharacterState, FeatureState, ServerStatus};
pub use crate::utils::error::Result;
