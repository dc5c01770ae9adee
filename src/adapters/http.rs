use crate::core::parse;
use crate::domain::model::{
    ApiFailure, ApiQuery, Character, CharactersApiResponse, Episode, Location,
};
use crate::domain::ports::{ConfigProvider, RnmApi};
use crate::utils::error::{RnmError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `RnmApi` over HTTP. Issues exactly one GET per call.
#[derive(Debug, Clone)]
pub struct HttpRnmApi {
    client: Client,
    base_url: String,
}

impl HttpRnmApi {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()?;
        // Fail early on a base URL that can't be joined onto.
        Url::parse(config.base_url())?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    async fn fetch(&self, url: Url) -> Result<String> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ApiFailure>(&body)
            .map(|failure| failure.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        tracing::warn!("API request to {} failed with {}: {}", url, status, message);

        Err(RnmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RnmApi for HttpRnmApi {
    async fn character(&self, id: u32) -> Result<Character> {
        let body = self.fetch(self.endpoint(&format!("character/{}", id))?).await?;
        parse::parse_character(&body)
    }

    async fn characters(&self, query: &ApiQuery) -> Result<CharactersApiResponse> {
        let mut url = self.endpoint("character")?;
        query.apply_to(&mut url);
        let body = self.fetch(url).await?;
        parse::parse_characters(&body)
    }

    async fn episode(&self, id: u32) -> Result<Episode> {
        let body = self.fetch(self.endpoint(&format!("episode/{}", id))?).await?;
        parse::parse_episode(&body)
    }

    async fn location(&self, id: u32) -> Result<Location> {
        let body = self.fetch(self.endpoint(&format!("location/{}", id))?).await?;
        parse::parse_location(&body)
    }
}
