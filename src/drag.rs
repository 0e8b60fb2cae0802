//! Press-drag-release session for creating entries on the month grid.
//!
//! One session at a time: `press` is only honored while idle, so a second
//! press cannot stack. The live preview is rebuilt from anchor + current on
//! every move, never patched in place. The view layer is responsible for
//! suppressing presses that start on a rendered event item and for hiding
//! its own selection highlight while a session runs.

use crate::model::Event;
use crate::model::item::{LIVE_PREVIEW_TAG, PREVIEW_TAG, end_of_day, start_of_day};
use chrono::{Duration, NaiveDate};

#[derive(Default)]
pub enum DragSession {
    #[default]
    Idle,
    Selecting(Selection),
}

pub struct Selection {
    anchor: NaiveDate,
    preview: Event,
}

/// Derive the live preview span from the anchor and the cell currently
/// under the pointer. Distinct days widen to a full-day range; a single day
/// stays a slot of at least one hour.
fn preview_for(anchor: NaiveDate, current: NaiveDate) -> Event {
    let lo = anchor.min(current);
    let hi = anchor.max(current);
    if lo != hi {
        Event::live_preview(start_of_day(lo), end_of_day(hi), true)
    } else {
        let start = start_of_day(lo);
        Event::live_preview(start, start + Duration::hours(1), false)
    }
}

impl DragSession {
    pub fn is_selecting(&self) -> bool {
        matches!(self, DragSession::Selecting(_))
    }

    /// The live preview, if a session is running.
    pub fn preview(&self) -> Option<&Event> {
        match self {
            DragSession::Idle => None,
            DragSession::Selecting(sel) => Some(&sel.preview),
        }
    }

    /// Press on an empty cell. Returns false (and changes nothing) unless
    /// the session was idle.
    pub fn press(&mut self, anchor: NaiveDate) -> bool {
        if self.is_selecting() {
            return false;
        }
        *self = DragSession::Selecting(Selection {
            anchor,
            preview: preview_for(anchor, anchor),
        });
        true
    }

    /// Pointer moved to another mapped cell.
    pub fn drag_to(&mut self, current: NaiveDate) {
        if let DragSession::Selecting(sel) = self {
            sel.preview = preview_for(sel.anchor, current);
        }
    }

    /// Release: freeze the live preview into a committed one and return it.
    /// Idle releases yield nothing.
    pub fn release(&mut self) -> Option<Event> {
        match std::mem::take(self) {
            DragSession::Idle => None,
            DragSession::Selecting(sel) => {
                let mut frozen = sel.preview;
                frozen.resource = Some(PREVIEW_TAG.to_string());
                Some(frozen)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn press_starts_a_one_hour_slot() {
        let mut session = DragSession::default();
        assert!(session.press(day(10)));
        let preview = session.preview().unwrap();
        assert_eq!(preview.start, start_of_day(day(10)));
        assert_eq!(preview.end, start_of_day(day(10)) + Duration::hours(1));
        assert!(!preview.all_day);
        assert_eq!(preview.resource.as_deref(), Some(LIVE_PREVIEW_TAG));
    }

    #[test]
    fn cross_day_drag_becomes_all_day_regardless_of_direction() {
        for (press, drag) in [(day(10), day(12)), (day(12), day(10))] {
            let mut session = DragSession::default();
            session.press(press);
            session.drag_to(drag);
            let preview = session.preview().unwrap();
            assert_eq!(preview.start, start_of_day(day(10)));
            assert_eq!(preview.end, end_of_day(day(12)));
            assert!(preview.all_day);
        }
    }

    #[test]
    fn preview_is_rebuilt_not_accumulated() {
        let mut session = DragSession::default();
        session.press(day(10));
        session.drag_to(day(14));
        // Dragging back narrows the span; a merged preview would stay wide.
        session.drag_to(day(11));
        let preview = session.preview().unwrap();
        assert_eq!(preview.start, start_of_day(day(10)));
        assert_eq!(preview.end, end_of_day(day(11)));
    }

    #[test]
    fn drag_back_onto_anchor_is_a_slot_again() {
        let mut session = DragSession::default();
        session.press(day(10));
        session.drag_to(day(12));
        session.drag_to(day(10));
        let preview = session.preview().unwrap();
        assert!(!preview.all_day);
        assert_eq!(preview.end - preview.start, Duration::hours(1));
    }

    #[test]
    fn release_freezes_and_resets() {
        let mut session = DragSession::default();
        session.press(day(10));
        session.drag_to(day(11));
        let frozen = session.release().unwrap();
        assert_eq!(frozen.resource.as_deref(), Some(PREVIEW_TAG));
        assert!(!session.is_selecting());
        assert!(session.release().is_none());
    }

    #[test]
    fn second_press_is_rejected_while_selecting() {
        let mut session = DragSession::default();
        assert!(session.press(day(10)));
        assert!(!session.press(day(20)));
        // The original anchor still governs the preview.
        session.drag_to(day(11));
        let preview = session.preview().unwrap();
        assert_eq!(preview.start, start_of_day(day(10)));
    }

    #[test]
    fn idle_release_commits_nothing() {
        let mut session = DragSession::default();
        assert!(session.release().is_none());
    }
}
