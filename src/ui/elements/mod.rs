// src/ui/elements/mod.rs
pub mod editor;
pub mod popups;
pub mod top_panel;
