//! Status board grouping for the kanban view.
//!
//! Shares the filter panel's criteria but interprets the timeframe values
//! through its own fixed day table, and orders columns by priority rank
//! rather than the calendar's descending weight. Both quirks are inherited
//! behavior and covered by tests.

use crate::model::{Event, EventKind, FilterState, Status};
use chrono::NaiveDateTime;

/// Day window for a board timeframe value. Unknown values collapse to zero
/// days, so a calendar-style value like "1week" only ever matches "today".
fn timeframe_days(value: &str) -> i64 {
    match value {
        "today" => 0,
        "week" => 7,
        "month" => 30,
        _ => 0,
    }
}

fn days_until(start: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let secs = (start - now).num_seconds();
    secs.div_euclid(86_400) + if secs.rem_euclid(86_400) > 0 { 1 } else { 0 }
}

fn passes(event: &Event, filters: &FilterState, now: NaiveDateTime) -> bool {
    if event.kind != EventKind::Task {
        return false;
    }
    if !filters.priority.is_empty() && !filters.priority.contains(&event.priority) {
        return false;
    }
    if !filters.status.is_empty() && !filters.status.contains(&event.status) {
        return false;
    }
    if !filters.timeframe.is_empty() {
        let diff_days = days_until(event.start, now);
        let within = filters
            .timeframe
            .iter()
            .any(|tf| diff_days >= 0 && diff_days <= timeframe_days(tf));
        if !within {
            return false;
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

/// One column per known status, tasks ordered high -> medium -> low.
pub fn group(
    events: &[Event],
    filters: &FilterState,
    now: NaiveDateTime,
) -> [(Status, Vec<Event>); 4] {
    Status::ALL.map(|status| {
        let mut column: Vec<Event> = events
            .iter()
            .filter(|e| e.status == status && passes(e, filters, now))
            .cloned()
            .collect();
        column.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank()));
        (status, column)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn task(title: &str, priority: Priority, status: Status, days_out: i64) -> Event {
        let start = now() + Duration::days(days_out);
        let mut ev = Event::new(title, start, start + Duration::hours(1));
        ev.priority = priority;
        ev.status = status;
        ev
    }

    #[test]
    fn tasks_bucket_by_exact_status() {
        let events = vec![
            task("a", Priority::Medium, Status::Todo, 1),
            task("b", Priority::Medium, Status::Review, 1),
            task("c", Priority::Medium, Status::Completed, 1),
        ];
        let grouped = group(&events, &FilterState::default(), now());
        assert_eq!(grouped.len(), 4);
        let lens: Vec<usize> = grouped.iter().map(|(_, col)| col.len()).collect();
        assert_eq!(lens, vec![1, 0, 1, 1]);
        assert_eq!(grouped[0].0, Status::Todo);
        assert_eq!(grouped[0].1[0].title, "a");
    }

    #[test]
    fn columns_order_high_medium_low() {
        let events = vec![
            task("low", Priority::Low, Status::Todo, 1),
            task("med", Priority::Medium, Status::Todo, 1),
            task("high", Priority::High, Status::Todo, 1),
        ];
        let grouped = group(&events, &FilterState::default(), now());
        let titles: Vec<&str> = grouped[0].1.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "med", "low"]);
    }

    #[test]
    fn plain_events_never_appear() {
        let start = now() + Duration::days(1);
        let mut meeting = Event::new("standup", start, start + Duration::hours(1));
        meeting.kind = EventKind::Event;
        let grouped = group(&[meeting], &FilterState::default(), now());
        assert!(grouped.iter().all(|(_, col)| col.is_empty()));
    }

    #[test]
    fn board_timeframe_table_differs_from_filter_table() {
        // Five days out: inside the board's "week" window, but "week" is not
        // a calendar bucket value, so the filter engine would veto it.
        let events = vec![task("soon", Priority::Medium, Status::Todo, 5)];
        let mut filters = FilterState::default();
        filters.timeframe = vec!["week".to_string()];

        let grouped = group(&events, &filters, now());
        assert_eq!(grouped[0].1.len(), 1);
        assert!(crate::filter::apply(&events, &filters, now()).is_empty());
    }

    #[test]
    fn unknown_board_value_means_today_only() {
        let today = task("today", Priority::Medium, Status::Todo, 0);
        let tomorrow = task("tomorrow", Priority::Medium, Status::Todo, 1);
        let mut filters = FilterState::default();
        filters.timeframe = vec!["1week".to_string()];

        let grouped = group(&[today, tomorrow], &filters, now());
        assert_eq!(grouped[0].1.len(), 1);
        assert_eq!(grouped[0].1[0].title, "today");
    }
}
