use serde::{Deserialize, Serialize};

/// One entry of an event's reminder schedule: "send `value` `unit`s before
/// the event starts". Not persisted on its own; lives inside the event's
/// serialized schedule string.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ReminderUnit {
    Day,
    Hour,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    #[serde(rename = "type")]
    pub unit: ReminderUnit,
    pub value: u32,
}
