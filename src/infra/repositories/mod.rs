pub mod sqlite_event_repo;
pub mod sqlite_guest_repo;
