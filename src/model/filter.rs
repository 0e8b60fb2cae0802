// File: ./src/model/filter.rs
// Ephemeral filter criteria; never persisted.
use crate::model::item::{Priority, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Task,
    Event,
}

impl KindFilter {
    pub const ALL: [KindFilter; 3] = [KindFilter::All, KindFilter::Task, KindFilter::Event];

    pub fn label(self) -> &'static str {
        match self {
            KindFilter::All => "All",
            KindFilter::Task => "Tasks",
            KindFilter::Event => "Events",
        }
    }
}

/// A relative time window offered by the filter panel.
pub struct TimeframeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub days: i64,
}

pub const TIMEFRAME_OPTIONS: [TimeframeOption; 3] = [
    TimeframeOption {
        value: "1week",
        label: "Within 1 Week",
        days: 7,
    },
    TimeframeOption {
        value: "2weeks",
        label: "Within 2 Weeks",
        days: 14,
    },
    TimeframeOption {
        value: "3weeks",
        label: "Within 3 Weeks",
        days: 21,
    },
];

/// An empty set on any axis means "no restriction on this axis".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub kind: KindFilter,
    pub priority: Vec<Priority>,
    pub status: Vec<Status>,
    pub timeframe: Vec<String>,
    pub search: String,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.kind != KindFilter::All
            || !self.priority.is_empty()
            || !self.status.is_empty()
            || !self.timeframe.is_empty()
            || !self.search.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_priority(&mut self, p: Priority) {
        toggle(&mut self.priority, p);
    }

    pub fn toggle_status(&mut self, s: Status) {
        toggle(&mut self.status, s);
    }

    pub fn toggle_timeframe(&mut self, value: &str) {
        if let Some(pos) = self.timeframe.iter().position(|v| v == value) {
            self.timeframe.remove(pos);
        } else {
            self.timeframe.push(value.to_string());
        }
    }
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, value: T) {
    if let Some(pos) = set.iter().position(|v| *v == value) {
        set.remove(pos);
    } else {
        set.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_default() {
        let mut f = FilterState::default();
        assert!(!f.is_active());
        f.toggle_priority(Priority::High);
        f.toggle_timeframe("1week");
        assert!(f.is_active());
        f.toggle_priority(Priority::High);
        f.toggle_timeframe("1week");
        assert!(!f.is_active());
    }
}
