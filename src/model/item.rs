// File: ./src/model/item.rs
// The persisted planner entry and its enumerated fields.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNTITLED: &str = "Untitled Event";

/// Side-channel tag on the preview entry while the pointer is still down.
pub const LIVE_PREVIEW_TAG: &str = "live preview";
/// Side-channel tag on the frozen preview awaiting the editor.
pub const PREVIEW_TAG: &str = "preview";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort weight used by the filtered calendar list (descending: high first).
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Column rank used by the status board (ascending: high first).
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "todo")]
    Todo,
    // Stored with a space, matching the legacy wire format.
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Review,
        Status::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Review => "Review",
            Status::Completed => "Completed",
        }
    }

    /// Column header on the status board.
    pub fn column_title(self) -> &'static str {
        match self {
            Status::Todo => "TO DO",
            Status::InProgress => "IN PROGRESS",
            Status::Review => "REVIEW",
            Status::Completed => "DONE",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Task,
    Event,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Task => "Task",
            EventKind::Event => "Event",
        }
    }
}

/// A calendar entry. Tasks additionally carry a meaningful priority/status;
/// plain events keep the defaults and the board ignores them.
///
/// Every field except the date span is defaulted on load so a record written
/// by an older build (or by hand) still deserializes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default = "default_title")]
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, rename = "allDay")]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, rename = "type")]
    pub kind: EventKind,
}

fn default_title() -> String {
    UNTITLED.to_string()
}

impl Event {
    pub fn new(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let trimmed = title.trim();
        Self {
            id: Uuid::new_v4(),
            title: if trimmed.is_empty() {
                UNTITLED.to_string()
            } else {
                trimmed.to_string()
            },
            start,
            end,
            all_day: false,
            resource: None,
            priority: Priority::default(),
            description: String::new(),
            status: Status::default(),
            kind: EventKind::default(),
        }
    }

    pub fn is_preview(&self) -> bool {
        self.resource.is_some()
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap_or_default()
}

/// Resolve the date-range form into an all-day span, rejecting inverted
/// ranges. Start lands on 00:00:00 and end on 23:59:59 of its day.
pub fn planned_span(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let s = start_of_day(start);
    let e = end_of_day(end);
    if e < s {
        return Err("End date must be after start date".to_string());
    }
    Ok((s, e))
}

impl Event {
    /// Synthesized in-progress selection shown while dragging.
    pub fn live_preview(start: NaiveDateTime, end: NaiveDateTime, all_day: bool) -> Self {
        let mut ev = Event::new("New Event", start, end);
        ev.all_day = all_day;
        ev.resource = Some(LIVE_PREVIEW_TAG.to_string());
        ev
    }
}
