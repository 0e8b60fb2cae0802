pub mod board;
pub mod config;
pub mod drag;
pub mod filter;
pub mod grid;
pub mod model;
pub mod storage;
pub mod store;
pub mod tui;
