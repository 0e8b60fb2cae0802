//! Record editing form shown as a centered modal overlay.
//!
//! Builds a complete record on save; validation failures keep the form open
//! with the message on its error line and never touch the store.

use crate::model::item::planned_span;
use crate::model::{Event, EventKind, Priority, Status};
use chrono::{Duration, Local, NaiveDate};
use uuid::Uuid;

/// Why the editor is opening; resolved into an `EditorState` after the
/// settle draw.
pub enum EditorSeed {
    Create {
        preset_start: Option<NaiveDate>,
        preset_end: Option<NaiveDate>,
        status: Status,
    },
    Edit(Uuid),
}

#[derive(Clone, Copy, PartialEq)]
pub enum Field {
    Title,
    Start,
    End,
    Kind,
    Priority,
    Status,
    Description,
}

impl Field {
    const ORDER: [Field; 7] = [
        Field::Title,
        Field::Start,
        Field::End,
        Field::Kind,
        Field::Priority,
        Field::Status,
        Field::Description,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

pub struct EditorState {
    pub editing_id: Option<Uuid>,
    pub title: String,
    pub start_input: String,
    pub end_input: String,
    pub kind: EventKind,
    pub priority: Priority,
    pub status: Status,
    pub description: String,
    pub field: Field,
    pub error: Option<String>,
}

fn date_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl EditorState {
    pub fn create(
        preset_start: Option<NaiveDate>,
        preset_end: Option<NaiveDate>,
        status: Status,
    ) -> Self {
        let start = preset_start.unwrap_or_else(|| Local::now().date_naive());
        let end = preset_end.unwrap_or(start + Duration::days(1));
        Self {
            editing_id: None,
            title: String::new(),
            start_input: date_input(start),
            end_input: date_input(end),
            kind: EventKind::default(),
            priority: Priority::default(),
            status,
            description: String::new(),
            field: Field::Title,
            error: None,
        }
    }

    pub fn edit(event: &Event) -> Self {
        Self {
            editing_id: Some(event.id),
            title: event.title.clone(),
            start_input: date_input(event.start.date()),
            end_input: date_input(event.end.date()),
            kind: event.kind,
            priority: event.priority,
            status: event.status,
            description: event.description.clone(),
            field: Field::Title,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        let i = self.field.position();
        self.field = Field::ORDER[(i + 1) % Field::ORDER.len()];
    }

    pub fn previous_field(&mut self) {
        let i = self.field.position();
        self.field = Field::ORDER[(i + Field::ORDER.len() - 1) % Field::ORDER.len()];
    }

    fn text_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Title => Some(&mut self.title),
            Field::Start => Some(&mut self.start_input),
            Field::End => Some(&mut self.end_input),
            Field::Description => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(buf) = self.text_buffer() {
            buf.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(buf) = self.text_buffer() {
            buf.pop();
        }
    }

    /// Left/right on the enumerated fields cycles their options.
    pub fn cycle(&mut self, forward: bool) {
        match self.field {
            Field::Kind => {
                self.kind = match self.kind {
                    EventKind::Task => EventKind::Event,
                    EventKind::Event => EventKind::Task,
                };
            }
            Field::Priority => self.priority = cycle_in(&Priority::ALL, self.priority, forward),
            Field::Status => self.status = cycle_in(&Status::ALL, self.status, forward),
            _ => {}
        }
    }

    /// Resolve the form into a record. The span covers whole days, as all
    /// date-range entries do.
    pub fn build(&self) -> Result<Event, String> {
        let start = parse_date(&self.start_input)?;
        let end = parse_date(&self.end_input)?;
        let (s, e) = planned_span(start, end)?;
        let mut event = Event::new(&self.title, s, e);
        event.all_day = true;
        event.kind = self.kind;
        event.priority = self.priority;
        event.status = self.status;
        event.description = self.description.trim().to_string();
        Ok(event)
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date: {} (expected YYYY-MM-DD)", input.trim()))
}

fn cycle_in<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let i = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNTITLED;

    fn filled(start: &str, end: &str) -> EditorState {
        let mut ed = EditorState::create(None, None, Status::Todo);
        ed.title = "Ship it".to_string();
        ed.start_input = start.to_string();
        ed.end_input = end.to_string();
        ed
    }

    #[test]
    fn save_blocks_inverted_range() {
        let ed = filled("2025-06-10", "2025-06-08");
        let err = ed.build().unwrap_err();
        assert_eq!(err, "End date must be after start date");
    }

    #[test]
    fn save_produces_all_day_span() {
        let ev = filled("2025-06-08", "2025-06-10").build().unwrap();
        assert!(ev.all_day);
        assert_eq!(ev.start.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(ev.end.time(), chrono::NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn blank_title_saves_as_untitled() {
        let mut ed = filled("2025-06-08", "2025-06-09");
        ed.title = "  ".to_string();
        assert_eq!(ed.build().unwrap().title, UNTITLED);
    }

    #[test]
    fn malformed_date_is_reported_not_defaulted() {
        let ed = filled("June 8th", "2025-06-09");
        assert!(ed.build().unwrap_err().contains("Invalid date"));
    }

    #[test]
    fn editing_preserves_identity_fields() {
        let ev = filled("2025-06-08", "2025-06-09").build().unwrap();
        let ed = EditorState::edit(&ev);
        assert_eq!(ed.editing_id, Some(ev.id));
        assert_eq!(ed.title, "Ship it");
        assert_eq!(ed.start_input, "2025-06-08");
    }

    #[test]
    fn cycle_walks_priority_both_ways() {
        let mut ed = filled("2025-06-08", "2025-06-09");
        ed.field = Field::Priority;
        assert_eq!(ed.priority, Priority::Medium);
        ed.cycle(true);
        assert_eq!(ed.priority, Priority::Low);
        ed.cycle(false);
        ed.cycle(false);
        assert_eq!(ed.priority, Priority::High);
    }
}
