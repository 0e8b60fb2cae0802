use crate::board;
use crate::drag::DragSession;
use crate::filter;
use crate::grid::{self, GridGeometry};
use crate::model::{Event, FilterState, KindFilter, Priority, Status, TIMEFRAME_OPTIONS};
use crate::store::EventStore;
use crate::tui::editor::{EditorSeed, EditorState};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use ratatui::layout::Rect;
use uuid::Uuid;

#[derive(PartialEq, Clone, Copy)]
pub enum View {
    Calendar,
    Board,
}

#[derive(PartialEq, Clone, Copy)]
pub enum Focus {
    Main,
    Sidebar,
}

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Searching,
}

/// One toggle target in the filter sidebar, in display order.
#[derive(Clone, Copy, PartialEq)]
pub enum SidebarRow {
    Search,
    Kind(KindFilter),
    Priority(Priority),
    Status(Status),
    Timeframe(&'static str),
    Clear,
}

/// A pointer gesture on an existing rendered event item.
pub struct EventDrag {
    pub id: Uuid,
    pub origin: NaiveDate,
    pub current: NaiveDate,
    pub resize: bool,
    pub moved: bool,
}

pub struct AppState {
    pub store: EventStore,
    pub filters: FilterState,
    /// Any date inside the displayed month.
    pub month: NaiveDate,
    /// Keyboard day cursor on the month grid.
    pub cursor: NaiveDate,
    pub view: View,
    pub focus: Focus,
    pub mode: InputMode,
    pub sidebar_open: bool,
    pub sidebar_index: usize,
    pub drag: DragSession,
    pub event_drag: Option<EventDrag>,
    pub board_drag: Option<Uuid>,
    pub committed_preview: Option<Event>,
    /// Editor open deferred by one draw so the frozen preview renders once.
    pub pending_editor: Option<EditorSeed>,
    pub editor: Option<EditorState>,
    pub board_col: usize,
    pub board_row: usize,
    pub message: String,
    // Geometry recorded by the view layer on every draw; the mapper never
    // sees stale boxes because these are overwritten before input is read.
    pub grid_area: Option<Rect>,
    pub event_hits: Vec<(Rect, Uuid)>,
    pub card_hits: Vec<(Rect, Uuid)>,
    pub column_areas: Vec<(Rect, Status)>,
    pub sidebar_area: Option<Rect>,
}

impl AppState {
    pub fn new(store: EventStore, start_in_board: bool) -> Self {
        let today = Local::now().date_naive();
        Self {
            store,
            filters: FilterState::default(),
            month: today,
            cursor: today,
            view: if start_in_board {
                View::Board
            } else {
                View::Calendar
            },
            focus: Focus::Main,
            mode: InputMode::Normal,
            sidebar_open: false,
            sidebar_index: 0,
            drag: DragSession::default(),
            event_drag: None,
            board_drag: None,
            committed_preview: None,
            pending_editor: None,
            editor: None,
            board_col: 0,
            board_row: 0,
            message: "Tab: Board | /: Search | f: Filters | a: Add | q: Quit".to_string(),
            grid_area: None,
            event_hits: vec![],
            card_hits: vec![],
            column_areas: vec![],
            sidebar_area: None,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Visible set for the calendar: store plus any preview, re-filtered
    /// wholesale on every call.
    pub fn visible(&self, now: NaiveDateTime) -> Vec<Event> {
        let mut all: Vec<Event> = self.store.events().to_vec();
        if let Some(p) = self.drag.preview() {
            all.push(p.clone());
        }
        if let Some(p) = &self.committed_preview {
            all.push(p.clone());
        }
        filter::apply(&all, &self.filters, now)
    }

    pub fn board_columns(&self, now: NaiveDateTime) -> [(Status, Vec<Event>); 4] {
        board::group(self.store.events(), &self.filters, now)
    }

    pub fn month_label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn go_prev_month(&mut self) {
        self.month = shift_month(self.month, -1);
        self.cursor = self.month;
    }

    pub fn go_next_month(&mut self) {
        self.month = shift_month(self.month, 1);
        self.cursor = self.month;
    }

    pub fn go_today(&mut self) {
        let today = Local::now().date_naive();
        self.month = today;
        self.cursor = today;
    }

    /// Move the day cursor, following it across month boundaries.
    pub fn move_cursor(&mut self, days: i64) {
        self.cursor += Duration::days(days);
        if self.cursor.month() != self.month.month() || self.cursor.year() != self.month.year() {
            self.month = self.cursor;
        }
    }

    pub fn grid_geometry(&self) -> Option<GridGeometry> {
        self.grid_area.map(|r| GridGeometry {
            x: r.x as f64,
            y: r.y as f64,
            width: r.width as f64,
            height: r.height as f64,
        })
    }

    /// Date under a pointer coordinate, using this frame's geometry.
    pub fn date_at_pointer(&self, col: u16, row: u16) -> Option<NaiveDate> {
        let geometry = self.grid_geometry()?;
        grid::date_at(&geometry, col as f64, row as f64, self.month)
    }

    /// Rendered event item under the pointer, if any. Presses here must not
    /// start a drag-create session.
    pub fn event_at_pointer(&self, col: u16, row: u16) -> Option<Uuid> {
        self.event_hits
            .iter()
            .find(|(rect, _)| hit(rect, col, row))
            .map(|(_, id)| *id)
    }

    pub fn card_at_pointer(&self, col: u16, row: u16) -> Option<Uuid> {
        self.card_hits
            .iter()
            .find(|(rect, _)| hit(rect, col, row))
            .map(|(_, id)| *id)
    }

    pub fn column_at_pointer(&self, col: u16, row: u16) -> Option<Status> {
        self.column_areas
            .iter()
            .find(|(rect, _)| hit(rect, col, row))
            .map(|(_, status)| *status)
    }

    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows = vec![SidebarRow::Search];
        rows.extend(KindFilter::ALL.map(SidebarRow::Kind));
        rows.extend(Priority::ALL.map(SidebarRow::Priority));
        rows.extend(Status::ALL.map(SidebarRow::Status));
        rows.extend(TIMEFRAME_OPTIONS.iter().map(|o| SidebarRow::Timeframe(o.value)));
        rows.push(SidebarRow::Clear);
        rows
    }

    pub fn sidebar_next(&mut self) {
        let len = self.sidebar_rows().len();
        self.sidebar_index = (self.sidebar_index + 1) % len;
    }

    pub fn sidebar_previous(&mut self) {
        let len = self.sidebar_rows().len();
        self.sidebar_index = (self.sidebar_index + len - 1) % len;
    }

    /// Activate a sidebar row (keyboard toggle or mouse click).
    pub fn toggle_sidebar_row(&mut self, row: SidebarRow) {
        match row {
            SidebarRow::Search => self.mode = InputMode::Searching,
            SidebarRow::Kind(k) => self.filters.kind = k,
            SidebarRow::Priority(p) => self.filters.toggle_priority(p),
            SidebarRow::Status(s) => self.filters.toggle_status(s),
            SidebarRow::Timeframe(v) => self.filters.toggle_timeframe(v),
            SidebarRow::Clear => self.filters.clear(),
        }
    }

    pub fn board_move_selection(&mut self, d_col: i64, d_row: i64, now: NaiveDateTime) {
        let columns = self.board_columns(now);
        let cols = columns.len() as i64;
        self.board_col = (self.board_col as i64 + d_col).rem_euclid(cols) as usize;
        let len = columns[self.board_col].1.len();
        if len == 0 {
            self.board_row = 0;
        } else {
            self.board_row =
                (self.board_row as i64 + d_row).clamp(0, len as i64 - 1).max(0) as usize;
        }
    }

    pub fn board_selected(&self, now: NaiveDateTime) -> Option<Uuid> {
        let columns = self.board_columns(now);
        columns
            .get(self.board_col)
            .and_then(|(_, col)| col.get(self.board_row))
            .map(|e| e.id)
    }

    pub fn board_selected_status(&self) -> Status {
        Status::ALL[self.board_col.min(Status::ALL.len() - 1)]
    }
}

fn hit(rect: &Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month0() as i32 + delta;
    let year = zero_based.div_euclid(12);
    let month0 = zero_based.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date)
}
