// src/ui/elements/editor/mod.rs
pub mod deck_table;
pub mod main_editor;
pub mod state;

pub use main_editor::seat_layout_editor_ui;
pub use state::EditorWindowState;
