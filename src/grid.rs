//! Month-grid geometry and pointer-to-date mapping.
//!
//! The mapper is host-agnostic: the view layer hands it the bounding box of
//! the rendered 6x7 matrix for the current frame, and the mapper turns a
//! pointer coordinate into the calendar date under it. Geometry must come
//! from the render the pointer event belongs to; nothing here is cached.

use chrono::{Datelike, Duration, NaiveDate};

pub const GRID_ROWS: u32 = 6;
pub const GRID_COLS: u32 = 7;
pub const GRID_CELLS: u32 = GRID_ROWS * GRID_COLS;

/// Bounding box of the rendered month matrix, in the host's coordinate
/// space (terminal cells here, pixels elsewhere).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GridGeometry {
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }
}

/// First cell of the matrix: the Sunday on or before the 1st of the month.
pub fn grid_start(month: NaiveDate) -> NaiveDate {
    let first = month.with_day(1).unwrap_or(month);
    let back = first.weekday().num_days_from_sunday() as i64;
    first - Duration::days(back)
}

/// Date of cell `index` (0..42) for the displayed month.
pub fn date_of_cell(month: NaiveDate, index: u32) -> NaiveDate {
    grid_start(month) + Duration::days(index as i64)
}

/// Map a pointer coordinate to the calendar date under it, or `None` when
/// the pointer is outside the matrix. Callers must no-op on `None`.
pub fn date_at(geometry: &GridGeometry, px: f64, py: f64, month: NaiveDate) -> Option<NaiveDate> {
    if geometry.width <= 0.0 || geometry.height <= 0.0 || !geometry.contains(px, py) {
        return None;
    }
    let rel_x = px - geometry.x;
    let rel_y = py - geometry.y;
    let row = (rel_y / (geometry.height / GRID_ROWS as f64)).floor() as i64;
    let col = (rel_x / (geometry.width / GRID_COLS as f64)).floor() as i64;
    let cell = row * GRID_COLS as i64 + col;
    if !(0..GRID_CELLS as i64).contains(&cell) {
        return None;
    }
    Some(date_of_cell(month, cell as u32))
}
