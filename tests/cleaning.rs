use chrono::{TimeZone, Utc};
use serde_json::json;

use rust_data_cleaning::types::{Mapping, Value};
use rust_data_cleaning::{clean_value, process};

fn v(j: serde_json::Value) -> Value {
    Value::from(j)
}

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(entries.into_iter().collect())
}

fn arr(items: Vec<Value>) -> Value {
    Value::Array(items)
}

#[test]
fn end_to_end_scenario() {
    let input = obj(vec![
        ("one", Value::from(" ")),
        (
            "two",
            arr(vec![Value::from(""), Value::from(""), arr(vec![Value::from("")])]),
        ),
        ("three", Value::from(" four ")),
        (
            "five",
            arr(vec![Value::from("f "), Value::from(" "), Value::from(" do")]),
        ),
        (
            "six",
            obj(vec![
                ("thing", Value::from("one")),
                ("zap", Value::Null),
                ("un", Value::Undefined),
            ]),
        ),
        ("height", Value::Int64(0)),
        ("finish", Value::Bool(false)),
    ]);

    let expected = obj(vec![
        ("three", Value::from("four")),
        ("five", arr(vec![Value::from("f"), Value::from("do")])),
        (
            "six",
            obj(vec![("thing", Value::from("one")), ("zap", Value::Null)]),
        ),
        ("height", Value::Int64(0)),
        ("finish", Value::Bool(false)),
    ]);

    assert_eq!(clean_value(&input), Some(expected));
}

#[test]
fn complex_object_with_functions_and_nested_empties() {
    let input = obj(vec![
        ("one", Value::from(" ")),
        (
            "two",
            v(json!(["", "", "", [""]])),
        ),
        ("three", Value::from(" four ")),
        (
            "descriptions",
            v(json!(["SAMPLE SET", "", "", {"foo": "", "bar": null}])),
        ),
        ("badNews", v(json!([null, "", "", "SAMPLE"]))),
        ("five", v(json!(["f ", " ", " do"]))),
        (
            "six",
            obj(vec![
                ("thing", Value::from("one")),
                ("zap", Value::Null),
                ("un", Value::Undefined),
            ]),
        ),
        ("func", Value::function("func", |_| Value::Undefined)),
        ("width", Value::from("")),
        ("height", Value::Int64(0)),
        ("finish", Value::Bool(false)),
        ("start", Value::Bool(true)),
        ("nathan.drake@example.com", Value::from("Issue #1")),
    ]);

    assert_eq!(
        clean_value(&input),
        Some(v(json!({
            "three": "four",
            "descriptions": ["SAMPLE SET", {"bar": null}],
            "badNews": [null, "SAMPLE"],
            "five": ["f", "do"],
            "six": {"thing": "one", "zap": null},
            "height": 0,
            "finish": false,
            "start": true,
            "nathan.drake@example.com": "Issue #1",
        })))
    );
}

#[test]
fn emptiness_collapses_recursively() {
    assert_eq!(clean_value(&v(json!({"a": "", "b": "  "}))), None);
    assert_eq!(clean_value(&v(json!(["", "  ", []]))), None);
    assert_eq!(clean_value(&v(json!({"a": {"b": {"c": [[], {}, " "]}}}))), None);
    assert_eq!(clean_value(&v(json!([]))), None);
    assert_eq!(clean_value(&v(json!({}))), None);
}

#[test]
fn falsy_but_meaningful_values_survive_at_any_depth() {
    let input = v(json!({"a": 0, "b": false, "c": null, "d": {"e": [0, false, null]}}));
    assert_eq!(clean_value(&input), Some(input.clone()));
}

#[test]
fn whitespace_trimming() {
    assert_eq!(clean_value(&Value::from(" a ")), Some(Value::from("a")));
    assert_eq!(clean_value(&Value::from("   ")), None);
    assert_eq!(clean_value(&Value::from("")), None);
    assert_eq!(clean_value(&Value::from("\t\n x \r\n")), Some(Value::from("x")));
    // Byte order marks are whitespace; NEL is not.
    assert_eq!(clean_value(&Value::from("\u{FEFF}")), None);
    assert_eq!(
        clean_value(&Value::from("\u{85}x")),
        Some(Value::from("\u{85}x"))
    );
}

#[test]
fn sparse_array_holes_are_dropped() {
    let input = arr(vec![
        Value::Int64(1),
        Value::Undefined,
        Value::Int64(3),
        Value::Undefined,
        Value::Int64(5),
    ]);
    assert_eq!(clean_value(&input), Some(v(json!([1, 3, 5]))));
}

#[test]
fn function_valued_entries_are_dropped() {
    let input = obj(vec![
        ("a", Value::Int64(1)),
        ("fn", Value::function("noop", |_| Value::Undefined)),
    ]);
    assert_eq!(clean_value(&input), Some(v(json!({"a": 1}))));
    assert_eq!(clean_value(&Value::function("f", |_| Value::Null)), None);
}

#[test]
fn instances_recurse_like_mappings() {
    // Behaves like an object whose methods are functions: they disappear.
    let custom = Value::instance(
        "Custom",
        Mapping::new()
            .with("toString", Value::function("toString", |_| Value::from("")))
            .with("valueOf", Value::function("valueOf", |_| Value::Int64(0)))
            .with("value", "test"),
    );
    let input = obj(vec![("custom", custom), ("empty", Value::from(""))]);
    assert_eq!(
        clean_value(&input),
        Some(v(json!({"custom": {"value": "test"}})))
    );

    let hollow = Value::instance("Hollow", Mapping::new().with("x", " "));
    assert_eq!(clean_value(&hollow), None);
}

#[test]
fn opaque_values_pass_through_unchanged() {
    let when = Utc.with_ymd_and_hms(2020, 2, 29, 12, 0, 0).unwrap();
    let set = Value::Set(vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]);
    let map = Value::Map(vec![(Value::from("key"), Value::from("value"))]);
    // Collections are not recursed into, even when they hold empties.
    let set_of_empties = Value::Set(vec![Value::from(""), Value::Undefined]);
    let input = obj(vec![
        ("big", Value::BigInt(123)),
        ("pattern", Value::regex("test", "gi")),
        ("error", Value::Error("test".to_string())),
        ("map", map.clone()),
        ("set", set.clone()),
        ("hollow_set", set_of_empties.clone()),
        ("sym", Value::Symbol("tag".to_string())),
        ("date", Value::Date(when)),
        ("normal", Value::from("test")),
    ]);

    assert_eq!(clean_value(&input), Some(input.clone()));
}

#[test]
fn default_processing_of_every_kind() {
    let when = Utc::now();
    let input = obj(vec![
        ("str", Value::from(" test ")),
        ("empty", Value::from("")),
        ("num", Value::Int64(42)),
        ("bool", Value::Bool(false)),
        ("null", Value::Null),
        ("undef", Value::Undefined),
        ("func", Value::function("func", |_| Value::from("test"))),
        ("date", Value::Date(when)),
        ("arr", v(json!([1, "", 3]))),
        ("obj", v(json!({"nested": " value ", "empty": ""}))),
    ]);

    let expected = obj(vec![
        ("str", Value::from("test")),
        ("num", Value::Int64(42)),
        ("bool", Value::Bool(false)),
        ("null", Value::Null),
        ("date", Value::Date(when)),
        ("arr", v(json!([1, 3]))),
        ("obj", v(json!({"nested": "value"}))),
    ]);

    assert_eq!(process(&input).unwrap(), Some(expected));
}

#[test]
fn cleaning_is_idempotent() {
    let samples = vec![
        v(json!({"a": " x ", "b": ["", [" y "], {"c": null}], "d": 0})),
        v(json!([[["  deep  "]], [], {"k": [false]}])),
        v(json!("  padded  ")),
        obj(vec![
            ("f", Value::function("f", |_| Value::Null)),
            ("i", Value::instance("I", Mapping::new().with("x", " 1 "))),
            ("u", Value::Undefined),
            ("s", Value::Set(vec![])),
        ]),
    ];

    for sample in samples {
        let once = clean_value(&sample).expect("sample should not clean away");
        assert_eq!(clean_value(&once), Some(once.clone()), "sample: {sample:?}");
    }
}

#[test]
fn input_is_left_untouched() {
    let input = v(json!({"a": " x ", "b": ""}));
    let before = input.clone();
    let _ = clean_value(&input);
    assert_eq!(input, before);
}

#[test]
fn deeply_nested_objects() {
    let mut deep = v(json!({"value": "test"}));
    for _ in 0..100 {
        deep = obj(vec![("nested", deep), ("empty", Value::from(" "))]);
    }

    let out = clean_value(&deep).expect("leaf value survives");
    let rendered = serde_json::to_string(&out).unwrap();
    assert!(!rendered.contains("empty"));
    assert!(rendered.contains("\"value\":\"test\""));
}

#[test]
fn large_inputs_halve_cleanly() {
    let many_props: Mapping = (0..1000)
        .map(|i| {
            let value = if i % 2 == 0 {
                Value::from(format!("value{i}"))
            } else {
                Value::from("")
            };
            (format!("prop{i}"), value)
        })
        .collect();
    let out = clean_value(&Value::Object(many_props)).unwrap();
    assert_eq!(out.as_mapping().unwrap().len(), 500);

    let many_elements: Vec<Value> = (0..1000)
        .map(|i| match i % 3 {
            0 => Value::from(""),
            1 => Value::from(format!("value{i}")),
            _ => Value::Null,
        })
        .collect();
    let out = clean_value(&Value::Array(many_elements)).unwrap();
    // Every third element (the empty strings) is gone; nulls stay.
    assert_eq!(out.as_array().unwrap().len(), 666);
}
