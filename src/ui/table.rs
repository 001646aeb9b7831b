use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use csv_lens::state::AppState;

// ---------------------------------------------------------------------------
// Data preview (central panel)
// ---------------------------------------------------------------------------

/// Render the active view as a virtualised table.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let view = match state.store.current_view() {
        Some(ds) => ds,
        None => {
            instructions(ui);
            return;
        }
    };

    let row_height = state.config.row_height;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(
                Column::initial(120.0).at_least(40.0).clip(true),
                view.column_count(),
            )
            .header(row_height + 4.0, |mut header| {
                for (name, ty) in view.columns().iter().zip(view.column_types()) {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name).on_hover_text(ty.to_string());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, view.row_count(), |mut row| {
                    let cells = &view.rows()[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

fn instructions(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("Open a CSV file to get started  (File → Open… or drop it here)");
        ui.add_space(12.0);
        ui.label("1. Open a CSV file to view it as a table");
        ui.label("2. Select a column and enter a value to filter on");
        ui.label("3. Click 'Apply Filter' to show only rows that match exactly");
        ui.label("4. Click 'Reset Filter' to show all data again");
        ui.label("5. Use File → Export view… to save what is shown");
    });
}
