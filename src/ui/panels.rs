use eframe::egui::{self, Color32, RichText, Ui};

use csv_lens::state::{AppState, NoticeLevel};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    let columns = match state.store.full_dataset() {
        Some(ds) => ds.columns().to_vec(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Column");
    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(state.filter_column.clone())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                ui.selectable_value(&mut state.filter_column, col.clone(), col);
            }
        });

    ui.add_space(6.0);
    ui.strong("Value (exact match)");
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.filter_value)
            .desired_width(f32::INFINITY)
            .hint_text("value"),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    // Pick an existing value instead of typing it.
    let suggestions = state.value_suggestions();
    if !suggestions.is_empty() {
        egui::ComboBox::from_id_salt("filter_suggestions")
            .selected_text("Pick a value…")
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for value in &suggestions {
                    if ui.selectable_label(state.filter_value == *value, value).clicked() {
                        state.filter_value = value.clone();
                    }
                }
            });
    }

    ui.add_space(6.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Apply Filter").clicked() || submitted {
            state.apply_filter();
        }
        if ui.button("Reset Filter").clicked() {
            state.reset_filter();
        }
    });

    if let Some(status) = state.filter_status() {
        ui.add_space(6.0);
        ui.label(RichText::new(status).color(Color32::LIGHT_BLUE));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.store.current_view().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export view…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(summary)) = (&state.source_name, state.store.summary()) {
            ui.label(format!(
                "{name}: {} rows, {} columns ({} visible)",
                summary.total_rows, summary.total_columns, summary.visible_rows
            ));
        }

        if let Some(notice) = &state.notice {
            ui.separator();
            ui.label(RichText::new(&notice.text).color(notice_color(notice.level)));
        }
    });
}

fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Success => Color32::from_rgb(90, 180, 90),
        NoticeLevel::Warning => Color32::from_rgb(230, 170, 50),
        NoticeLevel::Error => Color32::RED,
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export view as CSV")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
