//! Filter engine: a pure pass over the event collection.
//!
//! Re-run wholesale on every store or criteria change; there is no
//! incremental mode.

use crate::model::{Event, EventKind, FilterState, KindFilter, TIMEFRAME_OPTIONS};
use chrono::NaiveDateTime;

/// Ceiling of the distance from `now` to `start` in days. Past entries go
/// negative and fall out of every timeframe bucket.
fn days_until(start: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let secs = (start - now).num_seconds();
    secs.div_euclid(86_400) + if secs.rem_euclid(86_400) > 0 { 1 } else { 0 }
}

fn passes(event: &Event, filters: &FilterState, now: NaiveDateTime) -> bool {
    match filters.kind {
        KindFilter::All => {}
        KindFilter::Task if event.kind != EventKind::Task => return false,
        KindFilter::Event if event.kind != EventKind::Event => return false,
        _ => {}
    }

    // Priority / status / timeframe only constrain tasks.
    if event.kind == EventKind::Task {
        if !filters.priority.is_empty() && !filters.priority.contains(&event.priority) {
            return false;
        }
        if !filters.status.is_empty() && !filters.status.contains(&event.status) {
            return false;
        }
        if !filters.timeframe.is_empty() {
            let diff_days = days_until(event.start, now);
            let within = filters.timeframe.iter().any(|tf| {
                TIMEFRAME_OPTIONS
                    .iter()
                    .find(|o| o.value == tf)
                    .is_some_and(|o| diff_days >= 0 && diff_days <= o.days)
            });
            if !within {
                return false;
            }
        }
    }

    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        if !event.title.to_lowercase().contains(&needle)
            && !event.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    true
}

/// Filtered, priority-sorted view of the collection. Sort is descending by
/// weight (high > medium > low) and stable, so equal weights keep their
/// stored order.
pub fn apply(events: &[Event], filters: &FilterState, now: NaiveDateTime) -> Vec<Event> {
    let mut visible: Vec<Event> = events
        .iter()
        .filter(|e| passes(e, filters, now))
        .cloned()
        .collect();
    visible.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn task(title: &str, priority: Priority, days_out: i64) -> Event {
        let start = now() + Duration::days(days_out);
        let mut ev = Event::new(title, start, start + Duration::hours(1));
        ev.priority = priority;
        ev
    }

    #[test]
    fn default_criteria_return_all_sorted_by_weight() {
        let events = vec![
            task("low", Priority::Low, 1),
            task("med a", Priority::Medium, 1),
            task("high", Priority::High, 1),
            task("med b", Priority::Medium, 1),
        ];
        let out = apply(&events, &FilterState::default(), now());
        let titles: Vec<&str> = out.iter().map(|e| e.title.as_str()).collect();
        // Stable: "med a" stays ahead of "med b".
        assert_eq!(titles, vec!["high", "med a", "med b", "low"]);
    }

    #[test]
    fn timeframe_buckets_are_inclusive_day_counts() {
        let events = vec![task("ten days out", Priority::Medium, 10)];

        let mut filters = FilterState::default();
        filters.timeframe = vec!["1week".to_string()];
        assert!(apply(&events, &filters, now()).is_empty());

        filters.timeframe = vec!["2weeks".to_string()];
        assert_eq!(apply(&events, &filters, now()).len(), 1);
    }

    #[test]
    fn past_tasks_fall_out_of_every_bucket() {
        let events = vec![task("yesterday", Priority::High, -1)];
        let mut filters = FilterState::default();
        filters.timeframe = vec!["3weeks".to_string()];
        assert!(apply(&events, &filters, now()).is_empty());
    }

    #[test]
    fn unknown_bucket_value_matches_nothing() {
        // The board interprets "week" as seven days; here it is just an
        // unknown bucket and vetoes every task.
        let events = vec![task("soon", Priority::Medium, 5)];
        let mut filters = FilterState::default();
        filters.timeframe = vec!["week".to_string()];
        assert!(apply(&events, &filters, now()).is_empty());
    }

    #[test]
    fn plain_events_skip_task_filters_but_not_search() {
        let start = now() + Duration::days(2);
        let mut party = Event::new("Garden party", start, start + Duration::hours(3));
        party.kind = EventKind::Event;

        let mut filters = FilterState::default();
        filters.priority = vec![Priority::High];
        filters.status = vec![Status::Review];
        filters.timeframe = vec!["1week".to_string()];
        assert_eq!(apply(&[party.clone()], &filters, now()).len(), 1);

        filters.search = "picnic".to_string();
        assert!(apply(&[party], &filters, now()).is_empty());
    }

    #[test]
    fn search_matches_title_or_description_case_insensitive() {
        let mut a = task("Write REPORT", Priority::Medium, 1);
        a.description = "quarterly numbers".to_string();
        let b = task("Groceries", Priority::Medium, 1);

        let mut filters = FilterState::default();
        filters.search = "report".to_string();
        assert_eq!(apply(&[a.clone(), b.clone()], &filters, now()).len(), 1);

        filters.search = "NUMBERS".to_string();
        assert_eq!(apply(&[a, b], &filters, now()).len(), 1);
    }

    #[test]
    fn type_filter_is_a_hard_veto() {
        let mut meeting = task("standup", Priority::High, 1);
        meeting.kind = EventKind::Event;
        let chores = task("chores", Priority::Low, 1);

        let mut filters = FilterState::default();
        filters.kind = KindFilter::Task;
        let out = apply(&[meeting, chores], &filters, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "chores");
    }
}
