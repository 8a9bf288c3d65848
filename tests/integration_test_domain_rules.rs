use chrono::{Duration, Utc};
use rsvp_backend::domain::models::guest::{Guest, GuestStatus, NewGuestParams};
use rsvp_backend::domain::models::reminder::{Reminder, ReminderUnit};
use rsvp_backend::domain::services::{guest_limit, reminders, rsvp};
use rsvp_backend::domain::services::reminders::ReminderEntry;

fn day(value: u32) -> Reminder {
    Reminder { unit: ReminderUnit::Day, value }
}

fn hour(value: u32) -> Reminder {
    Reminder { unit: ReminderUnit::Hour, value }
}

fn entry(unit: &str, value: i64) -> ReminderEntry {
    ReminderEntry { unit: unit.to_string(), value }
}

fn sample_guest() -> Guest {
    Guest::new(NewGuestParams {
        event_id: "ev-1".to_string(),
        email: "jane@example.com".to_string(),
        name: Some("Jane".to_string()),
        phone: None,
        notify_by_email: true,
        notify_by_sms: false,
        max_guests: None,
    })
}

#[test]
fn test_parse_handles_absent_and_malformed_schedules() {
    assert!(reminders::parse(None).is_empty());
    assert!(reminders::parse(Some("")).is_empty());
    assert!(reminders::parse(Some("   ")).is_empty());
    assert!(reminders::parse(Some("not json at all")).is_empty());
    assert!(reminders::parse(Some("{\"type\":\"day\"}")).is_empty());
    assert!(reminders::parse(Some("42")).is_empty());
}

#[test]
fn test_parse_accepts_legacy_days_encoding() {
    let parsed = reminders::parse(Some("[7,3,1]"));
    assert_eq!(parsed, vec![day(7), day(3), day(1)]);
}

#[test]
fn test_parse_drops_invalid_entries_and_keeps_the_rest() {
    let raw = r#"[{"type":"day","value":7},{"type":"week","value":1},{"type":"hour","value":0},{"value":3},5,"junk",{"type":"hour","value":24}]"#;
    let parsed = reminders::parse(Some(raw));
    assert_eq!(parsed, vec![day(7), day(5), hour(24)]);
}

#[test]
fn test_serialize_then_parse_roundtrips() {
    let schedule = vec![day(7), hour(48), day(1)];
    let raw = reminders::serialize(&schedule);
    assert_eq!(reminders::parse(Some(raw.as_str())), schedule);

    assert_eq!(reminders::serialize(&[]), "[]");
    assert!(reminders::parse(Some("[]")).is_empty());
}

#[test]
fn test_validate_reports_the_first_violation() {
    let ok = reminders::validate(&[entry("day", 7), entry("hour", 24)]).unwrap();
    assert_eq!(ok, vec![day(7), hour(24)]);

    let err = reminders::validate(&[entry("week", 1), entry("day", -3)]).unwrap_err();
    assert!(err.contains("week"));

    let err = reminders::validate(&[entry("day", 0)]).unwrap_err();
    assert!(err.contains("positive"));

    let too_many: Vec<ReminderEntry> = (1..=11).map(|v| entry("hour", v)).collect();
    let err = reminders::validate(&too_many).unwrap_err();
    assert!(err.contains("At most 10"));
}

#[test]
fn test_format_pluralizes_correctly() {
    assert_eq!(reminders::format(&day(1)), "1 day before");
    assert_eq!(reminders::format(&day(7)), "7 days before");
    assert_eq!(reminders::format(&hour(1)), "1 hour before");
    assert_eq!(reminders::format(&hour(48)), "48 hours before");
}

#[test]
fn test_sort_for_display_puts_days_first_largest_lead_first() {
    let mut schedule = vec![hour(2), day(1), day(7), hour(48)];
    reminders::sort_for_display(&mut schedule);
    assert_eq!(schedule, vec![day(7), day(1), hour(48), hour(2)]);
}

#[test]
fn test_is_due_window_boundaries() {
    let now = Utc::now();

    // Inside the lead window
    assert!(reminders::is_due(&day(7), now + Duration::days(3), now));
    // Still outside
    assert!(!reminders::is_due(&day(7), now + Duration::days(8), now));
    // Exactly at the boundary counts as due
    assert!(reminders::is_due(&hour(24), now + Duration::hours(24), now));
    // Past events are never due
    assert!(!reminders::is_due(&day(7), now - Duration::hours(1), now));

    let schedule = vec![day(30), hour(1)];
    assert!(reminders::schedule_due(&schedule, now + Duration::days(10), now));
    assert!(!reminders::schedule_due(&schedule, now + Duration::days(40), now));
}

#[test]
fn test_effective_limit_prefers_the_per_guest_override() {
    assert_eq!(guest_limit::effective_limit(Some(3), None), Some(3));
    assert_eq!(guest_limit::effective_limit(Some(3), Some(5)), Some(5));
    // Even a stricter override wins
    assert_eq!(guest_limit::effective_limit(Some(3), Some(1)), Some(1));
    assert_eq!(guest_limit::effective_limit(None, None), None);
}

#[test]
fn test_limit_check_counts_the_invitee() {
    // No limit anywhere
    assert_eq!(guest_limit::check(None, 50, None), Ok(None));

    // Cap 3: the invitee plus two fits exactly
    assert_eq!(guest_limit::check(Some(3), 2, None), Ok(Some(0)));
    assert_eq!(guest_limit::check(Some(3), 1, None), Ok(Some(1)));

    // Over the cap: the message names additional guests, not total seats
    let err = guest_limit::check(Some(2), 2, None).unwrap_err();
    assert_eq!(err, "Only 1 additional guest allowed");

    let err = guest_limit::check(Some(1), 1, None).unwrap_err();
    assert_eq!(err, "Only 0 additional guests allowed");

    let err = guest_limit::check(Some(4), 5, None).unwrap_err();
    assert_eq!(err, "Only 3 additional guests allowed");
}

#[test]
fn test_apply_status_transitions() {
    let now = Utc::now();
    let mut guest = sample_guest();
    guest.dietary_notes = Some("no nuts".to_string());

    rsvp::apply_status(&mut guest, GuestStatus::Attending, now);
    assert_eq!(guest.status, GuestStatus::Attending);
    assert_eq!(guest.responded_at, Some(now));
    assert_eq!(guest.dietary_notes.as_deref(), Some("no nuts"));

    rsvp::apply_status(&mut guest, GuestStatus::Maybe, now);
    assert_eq!(guest.status, GuestStatus::Maybe);
    assert_eq!(guest.responded_at, Some(now));
    assert!(guest.dietary_notes.is_none());

    rsvp::apply_status(&mut guest, GuestStatus::Pending, now);
    assert_eq!(guest.status, GuestStatus::Pending);
    assert!(guest.responded_at.is_none());
}

#[test]
fn test_additional_guests_collapse_unless_attending() {
    let names = vec!["Tom".to_string(), "Lea".to_string()];

    let kept = rsvp::normalized_additional_guests(GuestStatus::Attending, names.clone());
    assert_eq!(kept, names);

    for status in [GuestStatus::Pending, GuestStatus::NotAttending, GuestStatus::Maybe] {
        assert!(rsvp::normalized_additional_guests(status, names.clone()).is_empty());
    }
}

#[test]
fn test_new_guest_gets_a_token_and_pending_status() {
    let guest = sample_guest();
    assert_eq!(guest.status, GuestStatus::Pending);
    assert_eq!(guest.token.len(), 32);
    assert!(guest.token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(guest.responded_at.is_none());
    assert!(guest.reminder_sent_at.is_none());

    // Tokens are generated per guest, not derived from the input
    let other = sample_guest();
    assert_ne!(guest.token, other.token);
}
