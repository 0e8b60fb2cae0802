// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod filter;
pub mod item;

// Re-export types so code can use `crate::model::Event` directly
pub use filter::{FilterState, KindFilter, TIMEFRAME_OPTIONS, TimeframeOption};
pub use item::{Event, EventKind, Priority, Status, UNTITLED};
