use std::sync::Arc;

use faena_client::backend::FormBackend;
use faena_client::error::ClientError;
use faena_client::http::HttpBackend;
use faena_client::session::{session_keys, MemorySessionStore, SessionStore};
use faena_core::models::descriptor::FormBody;
use faena_core::models::request::{SubmissionData, SubmitFormRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn descriptor_json() -> serde_json::Value {
    json!({
        "id": 5,
        "name": "Inspección diaria",
        "form": {
            "formId": 5,
            "version": 2,
            "readOnly": false,
            "questions": [
                { "id": "obs", "name": "Observaciones", "type": "text", "required": true, "order": 1, "values": [] }
            ]
        }
    })
}

fn submission() -> SubmitFormRequest {
    SubmitFormRequest::insert(
        99,
        SubmissionData {
            id: 5,
            name: "Inspección diaria".to_string(),
            form: FormBody {
                form_id: 5,
                version: 2,
                read_only: false,
                questions: Vec::new(),
            },
        },
    )
}

#[tokio::test]
async fn fetch_sends_case_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/formularios/consulta"))
        .and(body_partial_json(json!({ "caso": "ART-17", "idUsuario": 99 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "code": 200, "data": descriptor_json() })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let form = backend.fetch_form("ART-17", 99).await.unwrap();
    assert_eq!(form.id, 5);
    assert_eq!(form.form.questions[0].id, "obs");
}

#[tokio::test]
async fn falsy_success_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Caso no encontrado" })),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.fetch_form("X", 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.server_message(), Some("Caso no encontrado"));
}

#[tokio::test]
async fn error_status_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "glosa": "BD caída" })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.submit_form(&submission()).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert_eq!(err.server_message(), Some("BD caída"));
}

#[tokio::test]
async fn submit_posts_insert_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/respuestas"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_partial_json(json!({ "caso": "INSERT", "user": 99, "data": { "id": 5 } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "codigo": 1, "glosa": "Guardado" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(MemorySessionStore::new());
    session.set(session_keys::TOKEN, "tok-123".to_string()).await;

    let backend = HttpBackend::new(format!("{}/", server.uri()))
        .with_paths("/api/consulta", "api/respuestas")
        .with_session(session);

    let receipt = backend.submit_form(&submission()).await.unwrap();
    assert_eq!(receipt.message.as_deref(), Some("Guardado"));
}

#[tokio::test]
async fn submit_rejection_carries_glosa() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "codigo": 0, "glosa": "Versión obsoleta" })),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.submit_form(&submission()).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Versión obsoleta"));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9");
    let err = backend.fetch_form("X", 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.server_message(), None);
}
