pub mod bulk;
pub mod guest_limit;
pub mod notifications;
pub mod reminders;
pub mod rsvp;
