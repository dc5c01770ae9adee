mod common;

use rnm_explorer::core::parse::{parse_character, parse_characters};
use rnm_explorer::{parse_response, ResponseKind, RnmApiResponse, RnmError};
use serde_json::json;

#[test]
fn test_characters_page_round_trip() {
    let payload = common::characters_page().to_string();
    let response = parse_response(&payload).unwrap();
    assert_eq!(response.kind(), ResponseKind::Characters);
    assert_eq!(response.error(), None);

    let RnmApiResponse::Characters(page) = &response else {
        panic!("expected a characters page");
    };
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.info.prev, None);
    assert_eq!(page.results[1].origin.id(), None);

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        common::characters_page()
    );
}

#[test]
fn test_minimal_character_payload() {
    let payload = r#"{ "id": 1, "name": "Rick", "url": "https://x/1", "created": "t",
        "origin": {"name":"Earth","url":"https://x/loc/1"}, "episode": ["https://x/ep/1"] }"#;

    let character = parse_character(payload).unwrap();
    assert_eq!(character.episode.len(), 1);
    assert_eq!(character.origin.url, "https://x/loc/1");

    let RnmApiResponse::Character(via_union) = parse_response(payload).unwrap() else {
        panic!("expected a character");
    };
    assert_eq!(via_union, character);
}

#[test]
fn test_page_with_more_results_than_count_is_rejected() {
    let mut page = common::characters_page();
    page["info"]["count"] = json!(1);

    let err = parse_characters(&page.to_string()).unwrap_err();
    assert!(matches!(err, RnmError::Validation { .. }));
    assert!(parse_response(&page.to_string()).is_err());
}

#[test]
fn test_errored_entry_is_data_not_failure() {
    let mut value = common::rick();
    value["error"] = json!("record is corrupt");

    let response = parse_response(&value.to_string()).unwrap();
    assert_eq!(response.error(), Some("record is corrupt"));

    let RnmApiResponse::Character(character) = response else {
        panic!("expected a character");
    };
    assert_eq!(character.status(), None);
    assert_eq!(character.species(), None);
}

#[test]
fn test_union_deserializes_through_serde() {
    let response: RnmApiResponse =
        serde_json::from_value(json!({"error": "There is nothing here"})).unwrap();
    assert_eq!(response.kind(), ResponseKind::Failure);

    assert!(serde_json::from_value::<RnmApiResponse>(json!("nope")).is_err());
}
