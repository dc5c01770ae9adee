use crate::domain::model::{ApiQuery, Character, CharactersApiResponse, Episode, Location};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

/// One request per call against the remote database.
#[async_trait]
pub trait RnmApi: Send + Sync {
    async fn character(&self, id: u32) -> Result<Character>;
    async fn characters(&self, query: &ApiQuery) -> Result<CharactersApiResponse>;
    async fn episode(&self, id: u32) -> Result<Episode>;
    async fn location(&self, id: u32) -> Result<Location>;
}
