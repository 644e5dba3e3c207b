#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::watch;

use faena_client::backend::{FormBackend, SubmitReceipt};
use faena_client::error::ClientError;
use faena_core::models::descriptor::FormDescriptor;
use faena_core::models::request::SubmitFormRequest;
use faena_core::models::state::SubmissionState;
use faena_engine::FormEngine;
use faena_storage::error::StorageError;
use faena_storage::upload::{PictureUpload, PictureUploader};

pub const CASE: &str = "charla-42";
pub const USER: i64 = 77;

/// Smallest byte string `image::guess_format` accepts as a PNG.
pub fn png() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    bytes
}

pub fn descriptor(questions: Value) -> FormDescriptor {
    serde_json::from_value(json!({
        "id": 12,
        "name": "Charla de seguridad",
        "instructions": "Complete antes de iniciar la faena",
        "startAt": null,
        "endAt": null,
        "formReadOnly": null,
        "buttonAction": null,
        "form": {
            "formId": 7,
            "version": 3,
            "readOnly": false,
            "questions": questions
        }
    }))
    .expect("descriptor should parse")
}

/// A form touching every question type.
pub fn site_inspection() -> FormDescriptor {
    descriptor(json!([
        {
            "id": "origen",
            "name": "Origen",
            "type": "hidden",
            "order": 0,
            "values": [{ "value": "app", "text": "app" }]
        },
        {
            "id": "area",
            "name": "Área",
            "type": "select_parent",
            "required": true,
            "order": 1,
            "values": [
                { "value": "A", "text": "Opt A" },
                { "value": "B", "text": "Opt B" },
                { "value": "C", "text": "Opt C" }
            ],
            "subParams": [
                { "opt": "A", "values": [{ "value": 1, "text": "Child 1" }, { "value": 2, "text": "Child 2" }] },
                { "opt": "B", "values": [{ "value": 3, "text": "Child 3" }] }
            ]
        },
        {
            "id": "riesgos",
            "name": "Riesgos",
            "type": "multiple_choice",
            "order": 2,
            "values": [],
            "queryValues": { "id": "area" }
        },
        {
            "id": "supervisor",
            "name": "Supervisor",
            "type": "text",
            "required": true,
            "allowComment": true,
            "order": 3,
            "values": []
        },
        {
            "id": "turno",
            "name": "Turno",
            "type": "select",
            "order": 3,
            "values": [{ "value": "dia", "text": "Día" }, { "value": "noche", "text": "Noche" }]
        },
        {
            "id": "fotos",
            "name": "Fotos",
            "type": "picture",
            "order": 4,
            "values": [],
            "allowPictures": { "min": 1, "max": 3 }
        }
    ]))
}

/// Records the engine's submission state each time a collaborator is called.
#[derive(Default)]
pub struct StateSpy {
    rx: Mutex<Option<watch::Receiver<SubmissionState>>>,
    seen: Mutex<Vec<SubmissionState>>,
}

impl StateSpy {
    pub fn watch(&self, rx: watch::Receiver<SubmissionState>) {
        *self.rx.lock().unwrap() = Some(rx);
    }

    fn record(&self) {
        if let Some(rx) = &*self.rx.lock().unwrap() {
            self.seen.lock().unwrap().push(rx.borrow().clone());
        }
    }

    pub fn seen(&self) -> Vec<SubmissionState> {
        self.seen.lock().unwrap().clone()
    }
}

pub enum Scripted {
    Ok,
    Fail(Option<String>),
}

/// In-memory backend that serves one descriptor and records submissions.
pub struct FakeBackend {
    pub descriptor: Mutex<FormDescriptor>,
    pub fetch: Mutex<Scripted>,
    pub submit: Mutex<Scripted>,
    pub fetches: AtomicUsize,
    pub submissions: Mutex<Vec<SubmitFormRequest>>,
    pub spy: StateSpy,
}

impl FakeBackend {
    pub fn serving(descriptor: FormDescriptor) -> Arc<Self> {
        Arc::new(Self {
            descriptor: Mutex::new(descriptor),
            fetch: Mutex::new(Scripted::Ok),
            submit: Mutex::new(Scripted::Ok),
            fetches: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            spy: StateSpy::default(),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SubmitFormRequest> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn set_fetch(&self, script: Scripted) {
        *self.fetch.lock().unwrap() = script;
    }

    pub fn set_submit(&self, script: Scripted) {
        *self.submit.lock().unwrap() = script;
    }
}

#[async_trait]
impl FormBackend for FakeBackend {
    async fn fetch_form(&self, _case_id: &str, _user_id: i64) -> Result<FormDescriptor, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &*self.fetch.lock().unwrap() {
            Scripted::Ok => Ok(self.descriptor.lock().unwrap().clone()),
            Scripted::Fail(message) => Err(ClientError::Rejected {
                message: message.clone(),
            }),
        }
    }

    async fn submit_form(&self, request: &SubmitFormRequest) -> Result<SubmitReceipt, ClientError> {
        self.spy.record();
        self.submissions.lock().unwrap().push(request.clone());
        match &*self.submit.lock().unwrap() {
            Scripted::Ok => Ok(SubmitReceipt {
                message: Some("Formulario guardado".to_string()),
            }),
            Scripted::Fail(message) => Err(ClientError::Rejected {
                message: message.clone(),
            }),
        }
    }
}

/// Uploader that fails the file names it is told to and succeeds otherwise.
#[derive(Default)]
pub struct FakeUploader {
    pub failing: Mutex<Vec<String>>,
    pub calls: Mutex<Vec<PictureUpload>>,
    pub spy: StateSpy,
}

impl FakeUploader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(names: &[&str]) -> Arc<Self> {
        let uploader = Self::default();
        *uploader.failing.lock().unwrap() = names.iter().map(|n| n.to_string()).collect();
        Arc::new(uploader)
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.file_name.clone()).collect()
    }
}

#[async_trait]
impl PictureUploader for FakeUploader {
    async fn upload(&self, picture: &PictureUpload) -> Result<String, StorageError> {
        self.spy.record();
        self.calls.lock().unwrap().push(picture.clone());
        if self.failing.lock().unwrap().contains(&picture.file_name) {
            return Err(StorageError::Status { status: 503 });
        }
        Ok(format!("https://cdn.faena.test/{}", picture.file_name))
    }
}

pub async fn loaded(
    descriptor: FormDescriptor,
    uploader: Arc<FakeUploader>,
) -> (FormEngine, Arc<FakeBackend>) {
    let backend = FakeBackend::serving(descriptor);
    let mut engine = FormEngine::new(backend.clone(), uploader);
    engine.load(CASE, USER).await.expect("load should succeed");
    (engine, backend)
}
