// src/ui/elements/editor/deck_table.rs
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::layout::{Cell, CellCoord, Deck, DeckGrid, SeatCategory};
use super::state::EditorWindowState;

const CELL_WIDTH: f32 = 64.0;
const CELL_HEIGHT: f32 = 30.0;
const ROW_HEADER_WIDTH: f32 = 36.0;

const SEATER_FILL: egui::Color32 = egui::Color32::from_rgb(52, 110, 74);
const SLEEPER_FILL: egui::Color32 = egui::Color32::from_rgb(60, 92, 140);
const CONTINUATION_FILL: egui::Color32 = egui::Color32::from_rgb(44, 68, 104);

/// What the operator did to a cell this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAction {
    Set {
        deck: Deck,
        coord: CellCoord,
        label: String,
    },
    Clear {
        deck: Deck,
        coord: CellCoord,
    },
}

fn cell_fill(cell: &Cell) -> Option<egui::Color32> {
    match (cell.category, cell.is_continuation) {
        (SeatCategory::Empty, _) => None,
        (SeatCategory::Seater, _) => Some(SEATER_FILL),
        (SeatCategory::Sleeper, false) => Some(SLEEPER_FILL),
        (SeatCategory::Sleeper, true) => Some(CONTINUATION_FILL),
    }
}

fn cell_text(cell: &Cell) -> egui::RichText {
    match cell.category {
        SeatCategory::Empty => egui::RichText::new("·").weak(),
        _ if cell.is_continuation => egui::RichText::new(cell.label.as_str()).italics(),
        _ => egui::RichText::new(cell.label.as_str()).strong(),
    }
}

/// Renders one deck grid. Click a cell to type a seat number (Enter commits,
/// Escape cancels, an empty number clears); right-click clears the seat.
pub fn deck_table(
    ui: &mut egui::Ui,
    deck: Deck,
    grid: &DeckGrid,
    state: &mut EditorWindowState,
    actions: &mut Vec<CellAction>,
) {
    let columns = grid.columns();
    let rows = grid.rows();
    if rows == 0 || columns == 0 {
        ui.label("(No deck loaded)");
        return;
    }

    ui.push_id(("deck_table", deck), |ui| {
        TableBuilder::new(ui)
            .striped(false)
            .vscroll(false)
            .column(Column::exact(ROW_HEADER_WIDTH))
            .columns(Column::exact(CELL_WIDTH), columns)
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for col in 0..columns {
                    header.col(|ui| {
                        ui.strong(format!("C{}", col + 1));
                    });
                }
            })
            .body(|body| {
                body.rows(CELL_HEIGHT, rows, |mut row| {
                    let r = row.index();
                    row.col(|ui| {
                        ui.label(format!("R{}", r + 1));
                    });
                    for c in 0..columns {
                        let coord = CellCoord::new(r, c);
                        row.col(|ui| {
                            let Ok(cell) = grid.get(coord) else {
                                return;
                            };
                            if state.is_editing(deck, coord) {
                                cell_editor(ui, deck, coord, state, actions);
                            } else {
                                cell_button(ui, deck, coord, cell, state, actions);
                            }
                        });
                    }
                });
            });
    });
}

fn cell_button(
    ui: &mut egui::Ui,
    deck: Deck,
    coord: CellCoord,
    cell: &Cell,
    state: &mut EditorWindowState,
    actions: &mut Vec<CellAction>,
) {
    let mut button = egui::Button::new(cell_text(cell));
    if let Some(fill) = cell_fill(cell) {
        button = button.fill(fill);
    }
    let response = ui
        .add_sized([CELL_WIDTH - 4.0, CELL_HEIGHT - 4.0], button)
        .on_hover_text(match cell.category {
            SeatCategory::Empty => format!("{} empty", coord),
            SeatCategory::Seater => format!("{} seater '{}'", coord, cell.label),
            SeatCategory::Sleeper => format!("{} sleeper '{}'", coord, cell.label),
        });

    if response.clicked() {
        start_edit(state, deck, coord, &cell.label, actions);
    } else if response.secondary_clicked() && !cell.is_empty() {
        actions.push(CellAction::Clear { deck, coord });
    }
}

/// Opens the inline editor on `coord`. An edit still open on another cell is
/// committed first, the same as if it had lost focus.
fn start_edit(
    state: &mut EditorWindowState,
    deck: Deck,
    coord: CellCoord,
    current_label: &str,
    actions: &mut Vec<CellAction>,
) {
    if let Some(pending) = state.begin_edit(deck, coord, current_label) {
        actions.push(CellAction::Set {
            deck: pending.deck,
            coord: pending.coord,
            label: pending.buffer,
        });
    }
}

fn cell_editor(
    ui: &mut egui::Ui,
    deck: Deck,
    coord: CellCoord,
    state: &mut EditorWindowState,
    actions: &mut Vec<CellAction>,
) {
    let Some(edit) = state.editing.as_mut() else {
        return;
    };
    let response = ui.add_sized(
        [CELL_WIDTH - 4.0, CELL_HEIGHT - 4.0],
        egui::TextEdit::singleline(&mut edit.buffer).char_limit(8),
    );
    if !edit.focus_requested {
        response.request_focus();
        edit.focus_requested = true;
    }
    if response.lost_focus() {
        let cancelled = ui.input(|i| i.key_pressed(egui::Key::Escape));
        if !cancelled {
            actions.push(CellAction::Set {
                deck,
                coord,
                label: edit.buffer.clone(),
            });
        }
        state.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_cells_commits_pending_text() {
        let mut state = EditorWindowState::default();
        let mut actions = Vec::new();

        start_edit(&mut state, Deck::Lower, CellCoord::new(0, 0), "", &mut actions);
        assert!(actions.is_empty());
        state.editing.as_mut().unwrap().buffer = "5".to_string();

        start_edit(&mut state, Deck::Upper, CellCoord::new(3, 2), "9", &mut actions);
        assert_eq!(
            actions,
            vec![CellAction::Set {
                deck: Deck::Lower,
                coord: CellCoord::new(0, 0),
                label: "5".to_string(),
            }]
        );
        assert!(state.is_editing(Deck::Upper, CellCoord::new(3, 2)));
        assert_eq!(state.editing.as_ref().unwrap().buffer, "9");
    }

    #[test]
    fn test_clicking_the_edited_cell_emits_nothing() {
        let mut state = EditorWindowState::default();
        let mut actions = Vec::new();
        start_edit(&mut state, Deck::Lower, CellCoord::new(2, 0), "4", &mut actions);
        start_edit(&mut state, Deck::Lower, CellCoord::new(2, 0), "4", &mut actions);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_cell_fill_by_category() {
        assert_eq!(cell_fill(&Cell::default()), None);
        assert_eq!(cell_fill(&Cell::seater("1")), Some(SEATER_FILL));
        assert_eq!(cell_fill(&Cell::sleeper("2", false)), Some(SLEEPER_FILL));
        assert_eq!(cell_fill(&Cell::sleeper("2", true)), Some(CONTINUATION_FILL));
    }
}
