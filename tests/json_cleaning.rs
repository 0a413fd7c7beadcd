use serde_json::json;

use rust_data_cleaning::classify::Category;
use rust_data_cleaning::json::{clean_json, clean_json_str, clean_ndjson_str, to_json};
use rust_data_cleaning::processing::{handler, keep, Engine, Overrides};
use rust_data_cleaning::types::Value;
use rust_data_cleaning::CleanError;

const MESSY: &str = include_str!("fixtures/messy.json");
const EVENTS: &str = include_str!("fixtures/events.ndjson");

#[test]
fn messy_document_is_cleaned() {
    let out = clean_json_str(MESSY, &Engine::new()).unwrap();

    assert_eq!(
        out,
        Some(json!({
            "id": 17,
            "name": "Grace Hopper",
            "tags": ["navy", "cobol"],
            "address": {"city": "Arlington", "zip": null},
            "scores": [0, 0.5, -1],
            "active": false,
            "notes": [{"text": "first compiler"}],
        }))
    );
}

#[test]
fn messy_document_keeps_source_key_order() {
    let out = clean_json_str(MESSY, &Engine::new()).unwrap().unwrap();
    let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["id", "name", "tags", "address", "scores", "active", "notes"]
    );
}

#[test]
fn ndjson_records_that_clean_away_are_dropped() {
    let out = clean_ndjson_str(EVENTS, &Engine::new()).unwrap();
    assert_eq!(
        out,
        vec![
            json!({"event": "login", "user": {"id": 1, "name": "Ada"}}),
            json!({"event": "logout", "meta": {"code": 0}}),
        ]
    );
}

#[test]
fn custom_engine_applies_to_json_text() {
    let engine = Engine::build(Overrides::new().set(Category::Textual, handler(keep))).unwrap();
    let out = clean_json_str(r#"{"a": "  x  ", "b": [], "c": ""}"#, &engine).unwrap();
    assert_eq!(out, Some(json!({"a": "  x  ", "c": ""})));
}

#[test]
fn document_that_cleans_away_is_none() {
    let out = clean_json_str(r#"{"a": [" ", {}], "b": ""}"#, &Engine::new()).unwrap();
    assert_eq!(out, None);
}

#[test]
fn text_input_errors() {
    let engine = Engine::new();
    assert!(matches!(
        clean_json_str("", &engine),
        Err(CleanError::InvalidInput { .. })
    ));
    assert!(matches!(
        clean_json_str("[1, 2", &engine),
        Err(CleanError::Json(_))
    ));

    let err = clean_ndjson_str("{\"ok\": 1}\n\n{broken\n", &engine).unwrap_err();
    assert!(matches!(err, CleanError::InvalidInput { .. }));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn clean_json_matches_value_cleaning() {
    let input = json!({"a": {"b": ["", " c "]}, "d": [null, ""]});
    let via_value = rust_data_cleaning::clean_value(&Value::from(&input))
        .and_then(|v| to_json(&v));
    assert_eq!(clean_json(&input), via_value);
    assert_eq!(clean_json(&input), Some(json!({"a": {"b": ["c"]}, "d": [null]})));
}
