mod common;

use jiff::civil::date;
use serde_json::json;

use common::{CASE, FakeBackend, FakeUploader, Scripted, USER, descriptor, loaded, site_inspection};
use faena_core::models::answer::Answer;
use faena_core::models::descriptor::QuestionType;
use faena_core::models::input::FieldInput;
use faena_core::models::option::FormValue;
use faena_core::models::state::LoadState;
use faena_engine::fields::field_for;
use faena_engine::messages;
use faena_engine::{EngineError, FormEngine};

#[tokio::test]
async fn sorts_by_order_keeping_ties_in_received_order() {
    let (engine, _) = loaded(site_inspection(), FakeUploader::new()).await;

    let ids: Vec<&str> = engine.sorted_questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["origen", "area", "riesgos", "supervisor", "turno", "fotos"]);
}

#[tokio::test]
async fn descriptor_is_kept_as_received() {
    let (engine, _) = loaded(site_inspection(), FakeUploader::new()).await;

    let d = engine.descriptor().expect("descriptor");
    assert_eq!(d.form.questions[3].id, "supervisor");
    assert_eq!(d.form.questions[4].id, "turno");
    assert_eq!(engine.load_state(), &LoadState::Ready);
}

#[tokio::test]
async fn hidden_questions_are_seeded_with_their_first_value() {
    let (engine, _) = loaded(site_inspection(), FakeUploader::new()).await;

    assert_eq!(
        engine.answers().get("origen"),
        Some(&Answer::choice(&FormValue::new("app", "app")))
    );
    assert_eq!(engine.answers().len(), 1);
}

#[tokio::test]
async fn hidden_questions_are_not_rendered() {
    let (engine, _) = loaded(site_inspection(), FakeUploader::new()).await;

    let view = engine.render().expect("render");
    assert_eq!(view.fields.len(), 5);
    assert!(view.fields.iter().all(|f| f.question_id != "origen"));
    assert_eq!(view.submit_label, "Enviar");
    assert!(!view.read_only);
    assert_eq!(engine.render_field("origen").expect("known question"), None);
}

#[tokio::test]
async fn failed_load_shows_server_message_and_no_partial_form() {
    let backend = FakeBackend::serving(site_inspection());
    backend.set_fetch(Scripted::Fail(Some("Caso no existe".to_string())));
    let mut engine = FormEngine::new(backend.clone(), FakeUploader::new());

    let err = engine.load(CASE, USER).await.unwrap_err();

    assert!(matches!(err, EngineError::Load { ref message } if message == "Caso no existe"));
    assert_eq!(
        engine.load_state(),
        &LoadState::Failed {
            message: "Caso no existe".to_string()
        }
    );
    assert!(engine.descriptor().is_none());
    assert!(engine.sorted_questions().is_empty());
    assert!(matches!(engine.render(), Err(EngineError::NotLoaded)));
}

#[tokio::test]
async fn failed_load_without_message_uses_generic_text() {
    let backend = FakeBackend::serving(site_inspection());
    backend.set_fetch(Scripted::Fail(None));
    let mut engine = FormEngine::new(backend, FakeUploader::new());

    let err = engine.load(CASE, USER).await.unwrap_err();

    assert!(matches!(err, EngineError::Load { ref message } if message == messages::LOAD_FAILURE));
}

#[tokio::test]
async fn retry_load_repeats_the_last_request() {
    let backend = FakeBackend::serving(site_inspection());
    backend.set_fetch(Scripted::Fail(None));
    let mut engine = FormEngine::new(backend.clone(), FakeUploader::new());
    assert!(engine.load(CASE, USER).await.is_err());

    backend.set_fetch(Scripted::Ok);
    engine.retry_load().await.expect("retry should succeed");

    assert_eq!(backend.fetch_count(), 2);
    assert_eq!(engine.load_state(), &LoadState::Ready);
    assert_eq!(engine.sorted_questions().len(), 6);
}

#[tokio::test]
async fn retry_before_any_load_is_rejected() {
    let mut engine = FormEngine::new(FakeBackend::serving(site_inspection()), FakeUploader::new());
    assert!(matches!(engine.retry_load().await, Err(EngineError::NotLoaded)));
}

#[tokio::test]
async fn failed_reload_drops_the_previous_form() {
    let (mut engine, backend) = loaded(site_inspection(), FakeUploader::new()).await;
    backend.set_fetch(Scripted::Fail(None));

    assert!(engine.retry_load().await.is_err());
    assert!(engine.descriptor().is_none());
    assert!(engine.answers().is_empty());
}

#[tokio::test]
async fn declared_read_only_disables_everything() {
    let mut d = site_inspection();
    d.form_read_only = Some(true);
    let (mut engine, _) = loaded(d, FakeUploader::new()).await;

    let view = engine.render().expect("render");
    assert!(view.read_only);
    assert!(view.fields.iter().all(|f| f.disabled));

    let err = engine
        .handle("supervisor", FieldInput::Text { text: "Ana".into() })
        .unwrap_err();
    assert!(matches!(err, EngineError::ReadOnly));
    assert!(matches!(engine.submit_form().await, Err(EngineError::ReadOnly)));
}

#[tokio::test]
async fn body_read_only_applies_when_top_level_flag_is_absent() {
    let mut d = site_inspection();
    d.form.read_only = true;
    let (engine, _) = loaded(d, FakeUploader::new()).await;
    assert!(engine.is_read_only());
}

#[tokio::test]
async fn validity_window_bounds_are_inclusive() {
    let mut d = site_inspection();
    d.start_at = Some("2026-03-01".to_string());
    d.end_at = Some("2026-03-31".to_string());
    let (engine, _) = loaded(d, FakeUploader::new()).await;

    assert!(engine.is_read_only_at(date(2026, 2, 28).at(23, 59, 0, 0)));
    assert!(!engine.is_read_only_at(date(2026, 3, 1).at(0, 0, 0, 0)));
    assert!(!engine.is_read_only_at(date(2026, 3, 31).at(23, 59, 59, 0)));
    assert!(engine.is_read_only_at(date(2026, 4, 1).at(0, 0, 0, 0)));
}

#[tokio::test]
async fn expired_form_is_read_only() {
    let mut d = descriptor(json!([]));
    d.end_at = Some("2000-01-01".to_string());
    let (engine, _) = loaded(d, FakeUploader::new()).await;
    assert!(engine.is_read_only());
}

#[test]
fn every_question_type_has_a_strategy() {
    for kind in [
        QuestionType::Hidden,
        QuestionType::SelectParent,
        QuestionType::Select,
        QuestionType::Text,
        QuestionType::MultipleChoice,
        QuestionType::Picture,
    ] {
        assert_eq!(field_for(kind).kind(), kind);
    }
}
