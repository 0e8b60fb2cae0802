//! Owned event collection plus its storage handle.
//!
//! The single shared mutable value of the application. Every successful
//! mutation persists the whole collection, including one that empties it,
//! so deleting the last entry really clears the saved data. Mutations match
//! records by id; previews never enter the store.

use crate::model::Event;
use crate::storage::Storage;
use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use uuid::Uuid;

pub struct EventStore {
    events: Vec<Event>,
    storage: Storage,
}

impl EventStore {
    pub fn load(storage: Storage) -> Self {
        let events = storage.load();
        Self { events, storage }
    }

    #[cfg(test)]
    pub fn in_memory(events: Vec<Event>) -> Self {
        Self {
            events,
            storage: Storage::open(Some(std::env::temp_dir().join(format!(
                "cadence-store-test-{}.json",
                Uuid::new_v4()
            )))),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.events)
    }

    pub fn add(&mut self, event: Event) -> Result<()> {
        self.events.push(event);
        self.persist()
    }

    /// Replace the record with `id` wholesale, keeping its identity.
    pub fn update(&mut self, id: Uuid, mut updated: Event) -> Result<()> {
        if let Some(existing) = self.events.iter_mut().find(|e| e.id == id) {
            updated.id = id;
            *existing = updated;
            self.persist()?;
        }
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// Drag-move: shift the whole span by a day delta.
    pub fn move_by_days(&mut self, id: Uuid, delta: i64) -> Result<()> {
        if delta == 0 {
            return Ok(());
        }
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.start += Duration::days(delta);
            event.end += Duration::days(delta);
            self.persist()?;
        }
        Ok(())
    }

    /// Drag-resize: replace the span. Inverted spans are rejected by the
    /// caller before reaching here; a stale id is a silent no-op.
    pub fn resize(&mut self, id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        if end < start {
            return Ok(());
        }
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            event.start = start;
            event.end = end;
            self.persist()?;
        }
        Ok(())
    }

    /// Board column drop.
    pub fn set_status(&mut self, id: Uuid, status: crate::model::Status) -> Result<()> {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == id) {
            if event.status == status {
                return Ok(());
            }
            event.status = status;
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use chrono::NaiveDate;

    fn span(day: u32) -> (NaiveDateTime, NaiveDateTime) {
        let d = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        (
            d.and_hms_opt(0, 0, 0).unwrap(),
            d.and_hms_opt(23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn mutations_match_on_id_not_structure() {
        let (s, e) = span(3);
        let a = Event::new("same title", s, e);
        let b = Event::new("same title", s, e);
        let a_id = a.id;
        let mut store = EventStore::in_memory(vec![a, b]);

        let mut edited = Event::new("renamed", s, e);
        edited.status = Status::Review;
        store.update(a_id, edited).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a_id).unwrap().title, "renamed");
        // The structurally-identical twin is untouched.
        assert_eq!(
            store
                .events()
                .iter()
                .filter(|e| e.title == "same title")
                .count(),
            1
        );
    }

    #[test]
    fn move_by_days_shifts_both_ends() {
        let (s, e) = span(3);
        let ev = Event::new("move me", s, e);
        let id = ev.id;
        let mut store = EventStore::in_memory(vec![ev]);
        store.move_by_days(id, 4).unwrap();
        let moved = store.get(id).unwrap();
        assert_eq!(moved.start.date(), NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
        assert_eq!(moved.end.date(), NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    }

    #[test]
    fn resize_rejects_inverted_span() {
        let (s, e) = span(3);
        let ev = Event::new("resize me", s, e);
        let id = ev.id;
        let mut store = EventStore::in_memory(vec![ev]);
        store.resize(id, e, s).unwrap();
        assert_eq!(store.get(id).unwrap().start, s);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let (s, e) = span(3);
        let a = Event::new("a", s, e);
        let b = Event::new("b", s, e);
        let a_id = a.id;
        let mut store = EventStore::in_memory(vec![a, b]);
        store.delete(a_id).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(a_id).is_none());
    }
}
