use crate::domain::model::Entry;
use crate::domain::ports::RnmApi;
use crate::domain::state::{ApplicationState, CharacterState, ServerStatus};

const INVALID_RECORD: &str = "invalid record";

/// Applies fetch outcomes to the application state and the character slice.
/// Failures end up as state, never as an error returned to the caller.
pub struct FeatureLoader<A: RnmApi> {
    api: A,
    app: ApplicationState,
    character: CharacterState,
}

impl<A: RnmApi> FeatureLoader<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            app: ApplicationState::new(),
            character: CharacterState::new(),
        }
    }

    pub fn app_state(&self) -> &ApplicationState {
        &self.app
    }

    pub fn character_state(&self) -> &CharacterState {
        &self.character
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load_character(&mut self, id: u32) -> &CharacterState {
        tracing::debug!("Loading character {}", id);
        self.app.set_loading(true);
        self.character.start();

        match self.api.character(id).await {
            Ok(character) if character.is_valid() => {
                tracing::debug!("Loaded character {} ({})", id, character.entry.name);
                self.character.succeed(character);
                self.app.set_server_status(ServerStatus::Ok);
            }
            Ok(character) => {
                let message = character
                    .entry
                    .error
                    .filter(|error| !error.trim().is_empty())
                    .unwrap_or_else(|| INVALID_RECORD.to_string());
                tracing::warn!("Character {} came back invalid: {}", id, message);
                self.character.fail(message);
                self.app.set_server_status(ServerStatus::Ok);
            }
            Err(e) => {
                tracing::warn!("Failed to load character {}: {}", id, e);
                if let Some(status) = e.server_status() {
                    self.app.set_server_status(status);
                }
                self.character.fail(e.user_friendly_message());
            }
        }

        self.app.set_loading(false);
        self.app.rerandomize();
        &self.character
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ApiEntry, ApiQuery, Character, CharactersApiResponse, EntityRef, Episode, Location,
    };
    use crate::utils::error::{Result, RnmError};
    use async_trait::async_trait;

    struct StubApi;

    fn character(id: u32, error: Option<&str>) -> Character {
        Character {
            entry: ApiEntry {
                id,
                name: "Rick Sanchez".to_string(),
                url: format!("https://rickandmortyapi.com/api/character/{}", id),
                created: "2017-11-04T18:48:46.250Z".to_string(),
                error: error.map(str::to_string),
            },
            status: Some("Alive".to_string()),
            species: Some("Human".to_string()),
            kind: None,
            gender: Some("Male".to_string()),
            origin: EntityRef {
                name: "Earth (C-137)".to_string(),
                url: "https://rickandmortyapi.com/api/location/1".to_string(),
            },
            location: None,
            image: None,
            episode: Vec::new(),
        }
    }

    #[async_trait]
    impl RnmApi for StubApi {
        async fn character(&self, id: u32) -> Result<Character> {
            match id {
                1 => Ok(character(1, None)),
                2 => Ok(character(2, Some("record is corrupt"))),
                3 => Ok(character(3, Some(""))),
                7 => Err(RnmError::ApiReported {
                    message: "Character not found".to_string(),
                }),
                8 => Err(RnmError::validation("missing field `origin`")),
                404 => Err(RnmError::Api {
                    status: 404,
                    message: "Character not found".to_string(),
                }),
                _ => Err(RnmError::Api {
                    status: 503,
                    message: "Service Unavailable".to_string(),
                }),
            }
        }

        async fn characters(&self, _query: &ApiQuery) -> Result<CharactersApiResponse> {
            unimplemented!()
        }

        async fn episode(&self, _id: u32) -> Result<Episode> {
            unimplemented!()
        }

        async fn location(&self, _id: u32) -> Result<Location> {
            unimplemented!()
        }
    }

    #[test]
    fn test_load_character_success() {
        let mut loader = FeatureLoader::new(StubApi);
        let state = tokio_test::block_on(loader.load_character(1));
        assert!(!state.is_loading);
        assert!(!state.has_error());
        assert_eq!(state.result.as_ref().map(|c| c.entry.id), Some(1));

        assert!(!loader.app_state().is_loading_global);
        assert_eq!(loader.app_state().server_status, ServerStatus::Ok);
        assert_eq!(loader.app_state().randomizer_key, 1);
    }

    #[test]
    fn test_load_invalid_record_is_a_feature_error() {
        let mut loader = FeatureLoader::new(StubApi);
        let state = tokio_test::block_on(loader.load_character(2));
        assert_eq!(state.error, "record is corrupt");
        assert!(state.result.is_none());
        assert_eq!(loader.app_state().server_status, ServerStatus::Ok);
    }

    #[test]
    fn test_blank_record_error_still_reports_failure() {
        let mut loader = FeatureLoader::new(StubApi);
        let state = tokio_test::block_on(loader.load_character(3));
        assert!(state.has_error());
        assert_eq!(state.error, "invalid record");
        assert!(state.result.is_none());
    }

    #[test]
    fn test_error_body_on_success_keeps_api_text() {
        let mut loader = FeatureLoader::new(StubApi);
        let state = tokio_test::block_on(loader.load_character(7));
        assert_eq!(state.error, "Character not found");
        assert_eq!(loader.app_state().server_status, ServerStatus::Ok);
    }

    #[test]
    fn test_malformed_body_sets_warning() {
        let mut loader = FeatureLoader::new(StubApi);
        let state = tokio_test::block_on(loader.load_character(8));
        assert!(state.has_error());
        assert_eq!(loader.app_state().server_status, ServerStatus::Warning);
    }

    #[test]
    fn test_not_found_keeps_server_ok() {
        let mut loader = FeatureLoader::new(StubApi);
        tokio_test::block_on(loader.load_character(1));
        let state = tokio_test::block_on(loader.load_character(404));
        assert_eq!(state.error, "Character not found");
        assert!(state.result.is_none());
        assert_eq!(loader.app_state().server_status, ServerStatus::Ok);
        assert_eq!(loader.app_state().randomizer_key, 2);
    }

    #[test]
    fn test_server_error_sets_warning_then_recovers() {
        let mut loader = FeatureLoader::new(StubApi);
        tokio_test::block_on(loader.load_character(500));
        assert_eq!(loader.app_state().server_status, ServerStatus::Warning);

        tokio_test::block_on(loader.load_character(1));
        assert_eq!(loader.app_state().server_status, ServerStatus::Ok);
    }
}
