use crate::utils::error::{RnmError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

static EPISODE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S(\d{2,})E(\d{2,})$").expect("episode code pattern compiles"));

/// Trailing numeric id of an API resource URL, e.g. `.../episode/28` -> 28.
pub fn resource_id(url: &str) -> Option<u32> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?
        .parse()
        .ok()
}

/// Fields shared by every record in the remote database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    pub id: u32,
    pub name: String,
    /// Canonical self-link; other records refer to this one through it.
    pub url: String,
    pub created: String,
    /// Set when the record is invalid; the remaining fields are then unreliable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiEntry {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn created_at(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).map_err(|e| {
            RnmError::validation(format!("invalid created timestamp '{}': {}", self.created, e))
        })
    }
}

pub trait Entry {
    fn entry(&self) -> &ApiEntry;

    fn id(&self) -> u32 {
        self.entry().id
    }

    fn is_valid(&self) -> bool {
        self.entry().is_valid()
    }
}

/// A `{name, url}` pointer to another record. Resolving it takes a separate fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub url: String,
}

impl EntityRef {
    pub fn id(&self) -> Option<u32> {
        resource_id(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(flatten)]
    pub entry: ApiEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub origin: EntityRef,
    /// Last known location. Served by the live API, absent from older payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Episode URLs, in broadcast order.
    pub episode: Vec<String>,
}

impl Character {
    fn detail<'a>(&'a self, field: &'a Option<String>) -> Option<&'a str> {
        if self.entry.is_valid() {
            field.as_deref()
        } else {
            None
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.detail(&self.status)
    }

    pub fn species(&self) -> Option<&str> {
        self.detail(&self.species)
    }

    pub fn kind(&self) -> Option<&str> {
        self.detail(&self.kind)
    }

    pub fn gender(&self) -> Option<&str> {
        self.detail(&self.gender)
    }

    pub fn image(&self) -> Option<&str> {
        self.detail(&self.image)
    }

    pub fn episode_ids(&self) -> Vec<u32> {
        self.episode.iter().filter_map(|url| resource_id(url)).collect()
    }
}

impl Entry for Character {
    fn entry(&self) -> &ApiEntry {
        &self.entry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeCode {
    pub season: u32,
    pub number: u32,
}

impl FromStr for EpisodeCode {
    type Err = RnmError;

    fn from_str(code: &str) -> Result<Self> {
        let invalid = || RnmError::InvalidEpisodeCode {
            code: code.to_string(),
        };
        let caps = EPISODE_CODE.captures(code).ok_or_else(invalid)?;
        let season = caps[1].parse().map_err(|_| invalid())?;
        let number = caps[2].parse().map_err(|_| invalid())?;
        Ok(Self { season, number })
    }
}

impl fmt::Display for EpisodeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(flatten)]
    pub entry: ApiEntry,
    pub air_date: String,
    /// Season/episode code such as `S01E01`.
    pub episode: String,
    pub characters: Vec<String>,
}

impl Episode {
    pub fn code(&self) -> Result<EpisodeCode> {
        self.episode.parse()
    }

    pub fn character_ids(&self) -> Vec<u32> {
        self.characters.iter().filter_map(|url| resource_id(url)).collect()
    }
}

impl Entry for Episode {
    fn entry(&self) -> &ApiEntry {
        &self.entry
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub entry: ApiEntry,
    #[serde(rename = "type")]
    pub kind: String,
    pub dimension: String,
    /// Characters last seen here.
    pub residents: Vec<String>,
}

impl Location {
    pub fn resident_ids(&self) -> Vec<u32> {
        self.residents.iter().filter_map(|url| resource_id(url)).collect()
    }
}

impl Entry for Location {
    fn entry(&self) -> &ApiEntry {
        &self.entry
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of the characters endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharactersApiResponse {
    pub info: ApiInfo,
    pub results: Vec<Character>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validate for CharactersApiResponse {
    fn validate(&self) -> Result<()> {
        if self.results.len() as u64 > u64::from(self.info.count) {
            return Err(RnmError::validation(format!(
                "page holds {} results but info.count is {}",
                self.results.len(),
                self.info.count
            )));
        }
        Ok(())
    }
}

/// The bare `{"error": "..."}` body served for unknown ids and empty searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Characters,
    Episode,
    Location,
    Character,
    Failure,
}

impl ResponseKind {
    /// Classifies a payload by the keys it carries.
    pub fn detect(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            RnmError::validation(format!("expected a JSON object, got {}", json_type(value)))
        })?;
        let has = |key: &str| obj.contains_key(key);

        if has("info") && has("results") {
            Ok(Self::Characters)
        } else if has("air_date") {
            Ok(Self::Episode)
        } else if has("dimension") || has("residents") {
            Ok(Self::Location)
        } else if has("origin") || has("species") || has("status") {
            Ok(Self::Character)
        } else if has("error") {
            Ok(Self::Failure)
        } else {
            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            Err(RnmError::validation(format!(
                "unrecognised response shape with keys [{}]",
                keys.join(", ")
            )))
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Characters => "characters",
            Self::Episode => "episode",
            Self::Location => "location",
            Self::Character => "character",
            Self::Failure => "failure",
        };
        f.write_str(name)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Any payload the API can answer with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RnmApiResponse {
    Characters(CharactersApiResponse),
    Episode(Episode),
    Location(Location),
    Character(Character),
    Failure(ApiFailure),
}

impl RnmApiResponse {
    pub fn from_value(value: Value) -> Result<Self> {
        let response = match ResponseKind::detect(&value)? {
            ResponseKind::Characters => Self::Characters(serde_json::from_value(value)?),
            ResponseKind::Episode => Self::Episode(serde_json::from_value(value)?),
            ResponseKind::Location => Self::Location(serde_json::from_value(value)?),
            ResponseKind::Character => Self::Character(serde_json::from_value(value)?),
            ResponseKind::Failure => Self::Failure(serde_json::from_value(value)?),
        };
        Ok(response)
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            Self::Characters(_) => ResponseKind::Characters,
            Self::Episode(_) => ResponseKind::Episode,
            Self::Location(_) => ResponseKind::Location,
            Self::Character(_) => ResponseKind::Character,
            Self::Failure(_) => ResponseKind::Failure,
        }
    }

    /// The error string carried by the payload, at whatever level it sits.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Characters(page) => page.error.as_deref(),
            Self::Episode(episode) => episode.entry.error.as_deref(),
            Self::Location(location) => location.entry.error.as_deref(),
            Self::Character(character) => character.entry.error.as_deref(),
            Self::Failure(failure) => Some(&failure.error),
        }
    }
}

impl<'de> Deserialize<'de> for RnmApiResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Query-string parameters. Keys are unique and non-blank; order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct ApiQuery(BTreeMap<String, String>);

impl ApiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from UI filter inputs. Blank values mean "filter not set"
    /// and are skipped; blank keys are rejected.
    pub fn from_inputs<I, K, V>(inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();
        for (key, value) in inputs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            query.insert(key.as_ref().trim(), value)?;
        }
        Ok(query)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RnmError::validation("query keys must not be empty"));
        }
        Ok(self.0.insert(key, value.into()))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(self.0.iter());
    }
}

impl TryFrom<BTreeMap<String, String>> for ApiQuery {
    type Error = RnmError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let mut query = Self::new();
        for (key, value) in map {
            query.insert(key, value)?;
        }
        Ok(query)
    }
}
