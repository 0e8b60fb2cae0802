use cadence::model::{Event, EventKind, Priority, Status};
use cadence::storage::Storage;
use cadence::store::EventStore;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cadence-{}-{}.json", name, Uuid::new_v4()))
}

fn sample(title: &str, day: u32, priority: Priority, status: Status) -> Event {
    let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
    let mut ev = Event::new(
        title,
        date.and_hms_opt(0, 0, 0).unwrap(),
        date.and_hms_opt(23, 59, 59).unwrap(),
    );
    ev.all_day = true;
    ev.priority = priority;
    ev.status = status;
    ev
}

#[test]
fn round_trip_preserves_every_persisted_field() {
    let path = scratch_file("roundtrip");
    let mut a = sample("Quarterly review", 3, Priority::High, Status::InProgress);
    a.description = "prep slides".to_string();
    let mut b = sample("Team offsite", 10, Priority::Low, Status::Todo);
    b.kind = EventKind::Event;
    let originals = vec![a, b];

    Storage::open(Some(path.clone()))
        .save(&originals)
        .unwrap();
    let reloaded = Storage::open(Some(path.clone())).load();
    fs::remove_file(&path).ok();

    assert_eq!(reloaded.len(), originals.len());
    for (orig, back) in originals.iter().zip(&reloaded) {
        assert_eq!(back.id, orig.id);
        assert_eq!(back.title, orig.title);
        assert_eq!(back.status, orig.status);
        assert_eq!(back.priority, orig.priority);
        assert_eq!(back.kind, orig.kind);
        assert_eq!(back.description, orig.description);
        assert_eq!(back.all_day, orig.all_day);
        // Full ISO timestamps: nothing below second precision to lose.
        assert_eq!(back.start, orig.start);
        assert_eq!(back.end, orig.end);
    }
}

#[test]
fn corrupt_file_means_no_prior_data() {
    let path = scratch_file("corrupt");
    fs::write(&path, "{not json").unwrap();
    let events = Storage::open(Some(path.clone())).load();
    fs::remove_file(&path).ok();
    assert!(events.is_empty());
}

#[test]
fn missing_file_means_no_prior_data() {
    let events = Storage::open(Some(scratch_file("absent"))).load();
    assert!(events.is_empty());
}

#[test]
fn legacy_records_without_ids_load_with_defaults() {
    let path = scratch_file("legacy");
    fs::write(
        &path,
        r#"[
            {"title":"Old task","start":"2025-06-01T00:00:00","end":"2025-06-01T23:59:59"},
            {"start":"2025-06-02T00:00:00","end":"2025-06-02T23:59:59","priority":"high"}
        ]"#,
    )
    .unwrap();
    let events = Storage::open(Some(path.clone())).load();
    fs::remove_file(&path).ok();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Old task");
    assert_eq!(events[0].priority, Priority::Medium);
    assert_eq!(events[1].title, "Untitled Event");
    assert_eq!(events[1].priority, Priority::High);
    assert_eq!(events[1].status, Status::Todo);
    // Generated ids are distinct, so by-id mutation can tell them apart.
    assert_ne!(events[0].id, events[1].id);
}

#[test]
fn deleting_the_last_entry_really_clears_the_saved_data() {
    let path = scratch_file("delete-last");
    let ev = sample("Only entry", 5, Priority::Medium, Status::Todo);
    let id = ev.id;

    let mut store = EventStore::load(Storage::open(Some(path.clone())));
    store.add(ev).unwrap();
    store.delete(id).unwrap();

    let reloaded = EventStore::load(Storage::open(Some(path.clone())));
    fs::remove_file(&path).ok();
    assert!(reloaded.is_empty());
}

#[test]
fn mutations_persist_without_an_explicit_save() {
    let path = scratch_file("autosave");
    let ev = sample("Move me", 5, Priority::Medium, Status::Todo);
    let id = ev.id;

    let mut store = EventStore::load(Storage::open(Some(path.clone())));
    store.add(ev).unwrap();
    store.move_by_days(id, 2).unwrap();
    store.set_status(id, Status::Completed).unwrap();

    let reloaded = EventStore::load(Storage::open(Some(path.clone())));
    fs::remove_file(&path).ok();
    let back = reloaded.get(id).expect("entry survived reload");
    assert_eq!(back.start.date(), NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    assert_eq!(back.status, Status::Completed);
}
