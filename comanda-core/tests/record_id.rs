use comanda_core::{
    document::{payload_record, shallow_merge},
    id::RecordId,
};
use serde_json::{Value, json};

#[test]
fn parses_request_ids() {
    assert_eq!("7".parse::<RecordId>().unwrap(), RecordId::new(7));
    assert_eq!(" 12 ".parse::<RecordId>().unwrap().get(), 12);
    assert!("abc".parse::<RecordId>().is_err());
    assert!("1.5".parse::<RecordId>().is_err());
}

#[test]
fn stored_ids_normalize_to_integers() {
    let id = RecordId::new(3);

    assert!(id.matches(&json!({ "id": 3 })));
    assert!(id.matches(&json!({ "id": 3.0 })));
    assert!(id.matches(&json!({ "id": "3" })));
    assert!(!id.matches(&json!({ "id": 3.5 })));
    assert!(!id.matches(&json!({ "id": "three" })));
    assert!(!id.matches(&json!({ "name": "no id" })));
    assert!(!id.matches(&json!(3)));
}

#[test]
fn out_of_range_float_ids_have_no_identity() {
    // 2^63 is one past i64::MAX and must not saturate into it
    assert_eq!(RecordId::from_value(&json!(9.223372036854775808e18)), None);
    assert_eq!(RecordId::from_value(&json!(1.0e19)), None);
    assert_eq!(
        RecordId::from_value(&json!(-9.223372036854775808e18)),
        Some(RecordId::new(i64::MIN))
    );
    assert!(!RecordId::new(i64::MAX).matches(&json!({ "id": 9.223372036854775808e18 })));
}

#[test]
fn next_id_starts_at_one() {
    assert_eq!(RecordId::next_for(&[]), Some(RecordId::new(1)));
    assert_eq!(RecordId::next_for(&[json!({ "name": "no id" })]), Some(RecordId::new(1)));
}

#[test]
fn next_id_is_max_plus_one() {
    let records = vec![json!({ "id": 1 }), json!({ "id": 3 })];
    assert_eq!(RecordId::next_for(&records), Some(RecordId::new(4)));

    let unordered = vec![json!({ "id": 9 }), json!({ "id": "2" }), json!({ "id": null })];
    assert_eq!(RecordId::next_for(&unordered), Some(RecordId::new(10)));
}

#[test]
fn next_id_exhausted() {
    assert_eq!(RecordId::next_for(&[json!({ "id": i64::MAX })]), None);
}

#[test]
fn shallow_merge_payload_wins() {
    let mut base = payload_record(json!({ "name": "Taco", "price": 3, "tags": ["a"] })).unwrap();
    shallow_merge(&mut base, payload_record(json!({ "price": 4, "tags": [] })).unwrap());

    assert_eq!(Value::Object(base), json!({ "name": "Taco", "price": 4, "tags": [] }));
}

#[test]
fn payload_must_be_an_object() {
    assert!(payload_record(json!([1, 2])).is_err());
    assert!(payload_record(json!("text")).is_err());
    assert!(payload_record(json!({})).is_ok());
}
