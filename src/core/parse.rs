use crate::domain::model::{
    Character, CharactersApiResponse, Episode, Location, ResponseKind, RnmApiResponse,
};
use crate::utils::error::{RnmError, Result};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses any API payload, classifying it by shape.
pub fn parse_response(payload: &str) -> Result<RnmApiResponse> {
    let value: Value = serde_json::from_str(payload)?;
    let response = RnmApiResponse::from_value(value)?;
    if let RnmApiResponse::Characters(page) = &response {
        page.validate()?;
    }
    tracing::debug!("Parsed {} payload ({} bytes)", response.kind(), payload.len());
    Ok(response)
}

pub fn parse_characters(payload: &str) -> Result<CharactersApiResponse> {
    let page: CharactersApiResponse = parse_as(payload, ResponseKind::Characters)?;
    page.validate()?;
    Ok(page)
}

pub fn parse_character(payload: &str) -> Result<Character> {
    parse_as(payload, ResponseKind::Character)
}

pub fn parse_episode(payload: &str) -> Result<Episode> {
    parse_as(payload, ResponseKind::Episode)
}

pub fn parse_location(payload: &str) -> Result<Location> {
    parse_as(payload, ResponseKind::Location)
}

fn parse_as<T: DeserializeOwned>(payload: &str, expected: ResponseKind) -> Result<T> {
    let value: Value = serde_json::from_str(payload)?;
    let reported = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);

    match serde_json::from_value(value) {
        Ok(record) => {
            tracing::debug!("Parsed {} payload ({} bytes)", expected, payload.len());
            Ok(record)
        }
        // An error body missing its detail fields is the API talking, not a schema break.
        Err(e) => match reported {
            Some(message) => {
                tracing::debug!("Expected {} but the API reported: {} ({})", expected, message, e);
                Err(RnmError::ApiReported { message })
            }
            None => Err(e.into()),
        },
    }
}
