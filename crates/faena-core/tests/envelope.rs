use faena_core::models::envelope::{Outcome, RawEnvelope};
use serde_json::json;

fn envelope(value: serde_json::Value) -> RawEnvelope {
    serde_json::from_value(value).expect("envelope should parse")
}

#[test]
fn success_flag_decides_when_present() {
    assert!(envelope(json!({ "success": true })).is_success());
    assert!(!envelope(json!({ "success": false, "codigo": 1 })).is_success());
}

#[test]
fn codigo_one_or_200_is_success() {
    assert!(envelope(json!({ "codigo": 1 })).is_success());
    assert!(envelope(json!({ "codigo": "200" })).is_success());
    assert!(envelope(json!({ "code": 200 })).is_success());
    assert!(!envelope(json!({ "codigo": 0 })).is_success());
    assert!(!envelope(json!({})).is_success());
}

#[test]
fn message_falls_back_to_glosa() {
    let e = envelope(json!({ "codigo": 0, "glosa": "Formulario cerrado" }));
    assert_eq!(e.message().as_deref(), Some("Formulario cerrado"));

    let e = envelope(json!({ "message": "  ", "glosa": "otra" }));
    assert_eq!(e.message().as_deref(), Some("otra"));
}

#[test]
fn narrow_decodes_data_on_success() {
    let e = envelope(json!({ "success": true, "data": [1, 2, 3] }));
    match e.narrow::<Vec<i64>>().unwrap() {
        Outcome::Success { data, .. } => assert_eq!(data, vec![1, 2, 3]),
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn narrow_requires_data_on_success() {
    let e = envelope(json!({ "success": true }));
    assert!(e.narrow::<Vec<i64>>().is_err());
}

#[test]
fn narrow_failure_keeps_message() {
    let e = envelope(json!({ "success": false, "message": "sin permisos" }));
    assert_eq!(
        e.narrow::<Vec<i64>>().unwrap(),
        Outcome::Failure {
            message: Some("sin permisos".to_string())
        }
    );
}

#[test]
fn ack_ignores_data() {
    let e = envelope(json!({ "codigo": 1, "glosa": "ok" }));
    assert_eq!(
        e.narrow_ack(),
        Outcome::Success {
            data: (),
            message: Some("ok".to_string())
        }
    );
}
