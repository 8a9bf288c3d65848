pub mod bulk;
pub mod event;
pub mod guest;
pub mod health;
pub mod reminder;
pub mod rsvp;
