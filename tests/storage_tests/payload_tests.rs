//! Tests for Payload
//!
//! These tests verify:
//! - Encoding of JSON and text bodies
//! - Decoding failures surface as InvalidPayload
//! - Conversion between encodings
//! - Typed (de)serialization

use std::collections::BTreeMap;

use ohnodb::storage::{Encoding, Payload};
use ohnodb::DbError;
use serde::Deserialize;
use serde_json::json;

#[test]
fn test_encoding_follows_variant() {
    assert_eq!(Payload::Json(json!(null)).encoding(), Encoding::Structured);
    assert_eq!(Payload::text("x").encoding(), Encoding::Text);
    assert_eq!(Encoding::default(), Encoding::Structured);
}

#[test]
fn test_encode_json_is_compact() {
    let payload = Payload::Json(json!({"a": [1, 2], "b": "c"}));

    assert_eq!(payload.encode().unwrap(), br#"{"a":[1,2],"b":"c"}"#.to_vec());
}

#[test]
fn test_encode_text_is_verbatim() {
    assert_eq!(
        Payload::text("line one\nline two").encode().unwrap(),
        b"line one\nline two".to_vec()
    );
}

#[test]
fn test_decode_structured_rejects_garbage() {
    let err = Payload::decode(b"{oops", Encoding::Structured).unwrap_err();
    assert!(matches!(err, DbError::InvalidPayload(_)));
}

#[test]
fn test_decode_structured_accepts_scalars() {
    assert_eq!(
        Payload::decode(b"42", Encoding::Structured).unwrap(),
        Payload::Json(json!(42))
    );
    assert_eq!(
        Payload::decode(br#""str""#, Encoding::Structured).unwrap(),
        Payload::Json(json!("str"))
    );
}

#[test]
fn test_into_encoding() {
    let json = Payload::Json(json!({"k": true}));
    assert_eq!(
        json.clone().into_encoding(Encoding::Text).unwrap(),
        Payload::text(r#"{"k":true}"#)
    );
    assert_eq!(json.clone().into_encoding(Encoding::Structured).unwrap(), json);

    assert_eq!(
        Payload::text("[1]").into_encoding(Encoding::Structured).unwrap(),
        Payload::Json(json!([1]))
    );
    assert!(matches!(
        Payload::text("plain").into_encoding(Encoding::Structured),
        Err(DbError::InvalidPayload(_))
    ));
}

#[test]
fn test_json_constructor_rejects_non_string_keys() {
    let mut map = BTreeMap::new();
    map.insert(vec![1u8], "v");

    assert!(matches!(Payload::json(&map), Err(DbError::InvalidPayload(_))));
}

#[test]
fn test_deserialize_typed() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    let payload = Payload::Json(json!({"x": 1, "y": 2}));
    assert_eq!(payload.deserialize::<Point>().unwrap(), Point { x: 1, y: 2 });

    let wrong = Payload::Json(json!({"x": "one"}));
    assert!(matches!(
        wrong.deserialize::<Point>(),
        Err(DbError::InvalidPayload(_))
    ));
}

#[test]
fn test_accessors_and_from_impls() {
    let text: Payload = "hi".into();
    assert_eq!(text.as_text(), Some("hi"));
    assert_eq!(text.as_json(), None);

    let json: Payload = json!([true]).into();
    assert_eq!(json.as_json(), Some(&json!([true])));
    assert_eq!(json.into_text().unwrap(), "[true]");

    let owned: Payload = String::from("owned").into();
    assert_eq!(owned, Payload::text("owned"));
}
