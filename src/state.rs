use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{EventRepository, GuestRepository};
use crate::domain::services::notifications::NotificationService;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub notifications: Arc<NotificationService>,
    pub templates: Arc<Tera>,
}
