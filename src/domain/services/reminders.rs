use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::domain::models::reminder::{Reminder, ReminderUnit};

/// Hard cap on schedule length, so one event cannot flood the dispatch pass.
pub const MAX_REMINDERS: usize = 10;

/// Raw schedule entry as submitted by a host, before it becomes a typed
/// `Reminder`. Kept loose on purpose: `validate` owns the shape check.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReminderEntry {
    #[serde(rename = "type")]
    pub unit: String,
    pub value: i64,
}

/// Decodes a stored schedule. Total: null, empty, malformed JSON and
/// non-array payloads all decode to an empty schedule, and invalid entries
/// are dropped rather than failing the rest.
///
/// Two encodings are accepted: the current `[{"type":"day","value":7}]` form
/// and the legacy flat list of days-before integers (`[7,3,1]`).
pub fn parse(raw: Option<&str>) -> Vec<Reminder> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let Ok(decoded) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    let Some(entries) = decoded.as_array() else {
        return Vec::new();
    };

    entries.iter().filter_map(decode_entry).collect()
}

fn decode_entry(entry: &Value) -> Option<Reminder> {
    // Legacy encoding: a bare number of days before the event.
    if let Some(days) = entry.as_u64() {
        let value = u32::try_from(days).ok()?;
        if value == 0 {
            return None;
        }
        return Some(Reminder { unit: ReminderUnit::Day, value });
    }

    let obj = entry.as_object()?;
    let unit = match obj.get("type")?.as_str()? {
        "day" => ReminderUnit::Day,
        "hour" => ReminderUnit::Hour,
        _ => return None,
    };
    let raw_value = obj.get("value")?.as_u64()?;
    let value = u32::try_from(raw_value).ok()?;
    if value == 0 {
        return None;
    }
    Some(Reminder { unit, value })
}

/// Deterministic JSON array of `{"type","value"}` objects. An empty schedule
/// serializes to `[]`, which `parse` round-trips back to an empty list.
pub fn serialize(reminders: &[Reminder]) -> String {
    serde_json::to_string(reminders).unwrap_or_else(|_| "[]".to_string())
}

/// Checks host-submitted entries and converts them into typed reminders.
/// Returns the first violation found, not an aggregate.
pub fn validate(entries: &[ReminderEntry]) -> Result<Vec<Reminder>, String> {
    if entries.len() > MAX_REMINDERS {
        return Err(format!("At most {} reminders are allowed per event", MAX_REMINDERS));
    }

    let mut reminders = Vec::with_capacity(entries.len());
    for entry in entries {
        let unit = match entry.unit.as_str() {
            "day" => ReminderUnit::Day,
            "hour" => ReminderUnit::Hour,
            other => return Err(format!("Unknown reminder type '{}'", other)),
        };
        if entry.value <= 0 {
            return Err(format!("Reminder value must be positive, got {}", entry.value));
        }
        let value = u32::try_from(entry.value)
            .map_err(|_| format!("Reminder value {} is out of range", entry.value))?;
        reminders.push(Reminder { unit, value });
    }

    Ok(reminders)
}

pub fn format(reminder: &Reminder) -> String {
    let noun = match (reminder.unit, reminder.value) {
        (ReminderUnit::Day, 1) => "day",
        (ReminderUnit::Day, _) => "days",
        (ReminderUnit::Hour, 1) => "hour",
        (ReminderUnit::Hour, _) => "hours",
    };
    format!("{} {} before", reminder.value, noun)
}

/// Display order: days before hours, larger leads first.
pub fn sort_for_display(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| {
        a.unit
            .cmp(&b.unit)
            .then(b.value.cmp(&a.value))
    });
}

fn lead_time(reminder: &Reminder) -> Duration {
    match reminder.unit {
        ReminderUnit::Day => Duration::days(reminder.value as i64),
        ReminderUnit::Hour => Duration::hours(reminder.value as i64),
    }
}

/// An entry is due once the remaining time until the event start has dropped
/// inside its lead window. Past events are never due.
pub fn is_due(reminder: &Reminder, starts_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < starts_at && starts_at - now <= lead_time(reminder)
}

/// A schedule is due when any of its entries is. Whether a guest actually
/// receives a nudge is gated separately by `reminder_sent_at`: one reminder
/// per guest, duplicate entries are redundant work rather than extra sends.
pub fn schedule_due(reminders: &[Reminder], starts_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    reminders.iter().any(|r| is_due(r, starts_at, now))
}
