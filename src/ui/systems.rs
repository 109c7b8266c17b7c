// src/ui/systems.rs
use bevy::prelude::*;

use crate::layout::events::LayoutOperationFeedback;
use crate::ui::UiFeedbackState;

/// Keeps the newest feedback message of the frame for the feedback bar.
pub fn handle_ui_feedback(
    mut feedback_events: EventReader<LayoutOperationFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    let Some(event) = feedback_events.read().last() else {
        return;
    };
    ui_feedback_state.last_message = event.message.clone();
    ui_feedback_state.is_error = event.is_error;
    if event.is_error {
        warn!("UI Feedback (Error): {}", event.message);
    } else {
        info!("UI Feedback: {}", event.message);
    }
}
