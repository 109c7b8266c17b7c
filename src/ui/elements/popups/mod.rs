// src/ui/elements/popups/mod.rs
pub mod clear_deck_popup;
pub mod settings_popup;

pub use clear_deck_popup::show_clear_deck_popup;
pub use settings_popup::show_settings_popup;
