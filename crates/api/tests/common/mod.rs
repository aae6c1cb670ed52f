#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_api::config::{NotifyFailurePolicy, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::notice::NewProjectNotice;
use folio_core::project::ImageIndex;
use folio_core::types::DbId;
use folio_db::models::image::ProjectImage;
use folio_db::models::project::{
    CreateProject, Project, ProjectRecord, ProjectSummary, ProjectWithImages,
};
use folio_db::store::ProjectStore;
use folio_notify::{NotifyError, ProjectNotifier, TelegramConfig};

pub const BASE_URL: &str = "https://folio.test";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory [`ProjectStore`] with a switch to make every call fail.
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    records: Mutex<Vec<ProjectRecord>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }

    async fn list_summaries(&self) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(records.iter().map(ProjectRecord::summary).collect())
    }

    async fn find_image(
        &self,
        project_id: DbId,
        index: ImageIndex,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        self.check()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.project.id == project_id)
            .and_then(|r| index.get(&r.images))
            .cloned())
    }

    async fn create(&self, input: &CreateProject) -> Result<ProjectRecord, sqlx::Error> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = chrono::Utc::now();
        let record = ProjectWithImages {
            project: Project {
                id,
                title: input.title.clone(),
                category: input.category.clone(),
                tools: input.tools.clone(),
                client: input.client.clone(),
                created_at: now,
                updated_at: now,
            },
            images: input
                .images
                .iter()
                .enumerate()
                .map(|(position, image)| ProjectImage {
                    project_id: id,
                    position: position as i32,
                    data: image.data.clone(),
                    content_type: image.content_type.clone(),
                    size: image.recorded_size(),
                    filename: image.filename.clone(),
                })
                .collect(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// [`ProjectNotifier`] that records every notice and can be told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<NewProjectNotice>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn notices(&self) -> Vec<NewProjectNotice> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectNotifier for RecordingNotifier {
    async fn notify(&self, notice: &NewProjectNotice) -> Result<(), NotifyError> {
        self.notices.lock().unwrap().push(notice.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::HttpStatus {
                status: 502,
                description: "Bad Gateway".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        public_base_url: BASE_URL.to_string(),
        notify_failure_policy: NotifyFailurePolicy::Strict,
        telegram: TelegramConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            bot_token: "test-token".to_string(),
            channel_id: "@folio-test".to_string(),
            timeout: Duration::from_secs(5),
        },
    }
}

/// Build the full application router around the given fakes.
pub fn build_app(
    store: Arc<dyn ProjectStore>,
    notifier: Arc<dyn ProjectNotifier>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        store,
        notifier,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh app plus handles on its store and notifier.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(NotifyFailurePolicy::Strict)
    }

    pub fn with_policy(policy: NotifyFailurePolicy) -> Self {
        let mut config = test_config();
        config.notify_failure_policy = policy;
        Self {
            store: Arc::new(MemoryStore::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            config,
        }
    }

    /// Router sharing this app's store and notifier.
    pub fn router(&self) -> Router {
        build_app(
            self.store.clone(),
            self.notifier.clone(),
            self.config.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

pub fn b64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// JSON for one image in a create request.
pub fn image_json(bytes: &[u8], content_type: Option<&str>, filename: &str) -> serde_json::Value {
    let mut image = serde_json::json!({
        "data": b64(bytes),
        "filename": filename,
    });
    if let Some(ct) = content_type {
        image["contentType"] = serde_json::Value::from(ct);
    }
    image
}

/// JSON for a create request with the given images.
pub fn project_json(title: &str, images: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "category": "Branding",
        "tools": ["Figma", "Illustrator"],
        "client": "Acme",
        "images": images,
    })
}
