use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tera::Tera;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::notifications::NotificationService;
use crate::infra::notify::http_email_service::HttpEmailService;
use crate::infra::notify::http_sms_service::HttpSmsService;
use crate::infra::repositories::{
    sqlite_event_repo::SqliteEventRepo, sqlite_guest_repo::SqliteGuestRepo,
};
use crate::state::AppState;

pub fn load_templates() -> Arc<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("invitation.html", include_str!("../templates/invitation.html"))
        .expect("Failed to load invitation template");
    tera.add_raw_template("reminder.html", include_str!("../templates/reminder.html"))
        .expect("Failed to load reminder template");
    tera.add_raw_template("confirmation.html", include_str!("../templates/confirmation.html"))
        .expect("Failed to load confirmation template");
    Arc::new(tera)
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let templates = load_templates();

    let email_sender = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));
    let sms_sender = Arc::new(HttpSmsService::new(
        config.sms_service_url.clone(),
        config.sms_service_token.clone(),
    ));

    let notifications = Arc::new(NotificationService::new(
        email_sender,
        sms_sender,
        templates.clone(),
        config.frontend_url.clone(),
    ));

    AppState {
        config: config.clone(),
        event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
        guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
        notifications,
        templates,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
