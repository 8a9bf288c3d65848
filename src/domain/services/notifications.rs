use std::sync::Arc;

use tera::{Context, Tera};
use tracing::info;

use crate::domain::models::event::Event;
use crate::domain::models::guest::Guest;
use crate::domain::ports::{EmailSender, SmsSender};
use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
enum MessageKind {
    Invitation,
    Reminder,
    Confirmation,
}

impl MessageKind {
    fn template(&self) -> &'static str {
        match self {
            MessageKind::Invitation => "invitation.html",
            MessageKind::Reminder => "reminder.html",
            MessageKind::Confirmation => "confirmation.html",
        }
    }

    fn subject(&self, event: &Event) -> String {
        match self {
            MessageKind::Invitation => format!("You're invited: {}", event.title),
            MessageKind::Reminder => format!("Reminder: {}", event.title),
            MessageKind::Confirmation => format!("RSVP received: {}", event.title),
        }
    }
}

/// Builds notification payloads and fans them out over the channels the
/// guest opted into. Single-guest and bulk paths share this so invitation
/// content is constructed exactly once.
pub struct NotificationService {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    templates: Arc<Tera>,
    frontend_url: String,
}

impl NotificationService {
    pub fn new(
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        templates: Arc<Tera>,
        frontend_url: String,
    ) -> Self {
        Self { email, sms, templates, frontend_url }
    }

    /// Returns Ok(true) when at least one channel delivered, Ok(false) when
    /// the guest has nothing to send to. "Nothing to send" is not an error.
    pub async fn send_invitation(&self, event: &Event, guest: &Guest) -> Result<bool, AppError> {
        self.dispatch(MessageKind::Invitation, event, guest).await
    }

    pub async fn send_reminder(&self, event: &Event, guest: &Guest) -> Result<bool, AppError> {
        self.dispatch(MessageKind::Reminder, event, guest).await
    }

    pub async fn send_confirmation(&self, event: &Event, guest: &Guest) -> Result<bool, AppError> {
        self.dispatch(MessageKind::Confirmation, event, guest).await
    }

    fn rsvp_link(&self, guest: &Guest) -> String {
        format!("{}/rsvp/{}", self.frontend_url, guest.token)
    }

    fn build_context(&self, event: &Event, guest: &Guest) -> Context {
        let mut context = Context::new();
        context.insert("guest_name", guest.name.as_deref().unwrap_or("there"));
        context.insert("event_title", &event.title);
        context.insert("host_name", &event.host_name);
        context.insert("location", &event.location);
        context.insert("starts_at", &event.starts_at.format("%Y-%m-%d %H:%M UTC").to_string());
        context.insert("rsvp_link", &self.rsvp_link(guest));
        context.insert("status", guest.status.as_str());
        context
    }

    async fn dispatch(&self, kind: MessageKind, event: &Event, guest: &Guest) -> Result<bool, AppError> {
        let mut delivered = false;

        if guest.notify_by_email {
            let context = self.build_context(event, guest);
            let body = self.templates.render(kind.template(), &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;
            self.email.send(&guest.email, &kind.subject(event), &body).await?;
            info!("Sent {} email to {}", kind.template(), guest.email);
            delivered = true;
        }

        if guest.notify_by_sms {
            if let Some(phone) = guest.phone.as_deref() {
                let body = match kind {
                    MessageKind::Invitation => format!(
                        "You're invited to {} on {}. RSVP: {}",
                        event.title,
                        event.starts_at.format("%Y-%m-%d %H:%M UTC"),
                        self.rsvp_link(guest)
                    ),
                    MessageKind::Reminder => format!(
                        "Reminder: {} starts {}. RSVP: {}",
                        event.title,
                        event.starts_at.format("%Y-%m-%d %H:%M UTC"),
                        self.rsvp_link(guest)
                    ),
                    MessageKind::Confirmation => format!(
                        "Your RSVP for {} was recorded: {}",
                        event.title,
                        guest.status.as_str()
                    ),
                };
                self.sms.send(phone, &body).await?;
                info!("Sent {} SMS to guest {}", kind.template(), guest.id);
                delivered = true;
            }
        }

        Ok(delivered)
    }
}
