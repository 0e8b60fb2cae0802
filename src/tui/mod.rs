pub mod editor;
pub mod state;
pub mod view;
