// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod elements;
pub mod systems;

use elements::editor::seat_layout_editor_ui;
use elements::editor::state::EditorWindowState;
use systems::handle_ui_feedback;

/// Last operator-facing message, shown in the feedback bar.
#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the seat-layout editor window.
pub struct EditorUiPlugin {
    /// Pre-fills the bus id field.
    pub initial_bus_id: Option<String>,
}

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .insert_resource(EditorWindowState::with_bus_id(self.initial_bus_id.clone()))
            .add_systems(Update, handle_ui_feedback)
            .add_systems(EguiContextPass, seat_layout_editor_ui);

        info!("EditorUiPlugin initialized.");
    }
}
