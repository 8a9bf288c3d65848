use rsvp_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{EmailSender, SmsSender},
    error::AppError,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo, sqlite_guest_repo::SqliteGuestRepo,
    },
    domain::services::notifications::NotificationService,
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const HOST_KEY: &str = "test-host-key";

/// Records every email instead of delivering it: (recipient, subject).
#[derive(Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, recipient: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

/// Records every SMS instead of delivering it: (phone, body).
#[derive(Default)]
pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send(&self, phone: &str, body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), body.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub emails: Arc<RecordingEmailSender>,
    pub sms: Arc<RecordingSmsSender>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            sms_service_url: "http://localhost".to_string(),
            sms_service_token: "token".to_string(),
            host_api_key: HOST_KEY.to_string(),
            frontend_url: "http://localhost:3001".to_string(),
        };

        let templates = load_templates();
        let emails = Arc::new(RecordingEmailSender::default());
        let sms = Arc::new(RecordingSmsSender::default());

        let notifications = Arc::new(NotificationService::new(
            emails.clone(),
            sms.clone(),
            templates.clone(),
            config.frontend_url.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            notifications,
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            emails,
            sms,
        }
    }

    /// POST as the host (with the API key), JSON body.
    pub async fn host_post(&self, uri: &str, body: serde_json::Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", HOST_KEY))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn host_put(&self, uri: &str, body: serde_json::Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", HOST_KEY))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn host_get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", HOST_KEY))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Anonymous request, JSON body (the public RSVP surface).
    pub async fn public_post(&self, uri: &str, body: serde_json::Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn public_get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Creates an event and returns its id.
    pub async fn create_event(&self, body: serde_json::Value) -> String {
        let response = self.host_post("/api/v1/events", body).await;
        assert!(
            response.status().is_success(),
            "Event creation failed in test helper: {}",
            response.status()
        );
        let data = parse_body(response).await;
        data["id"].as_str().unwrap().to_string()
    }

    /// Creates a guest under an event and returns the full response body.
    pub async fn create_guest(&self, event_id: &str, body: serde_json::Value) -> serde_json::Value {
        let response = self
            .host_post(&format!("/api/v1/events/{}/guests", event_id), body)
            .await;
        assert!(
            response.status().is_success(),
            "Guest creation failed in test helper: {}",
            response.status()
        );
        parse_body(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
