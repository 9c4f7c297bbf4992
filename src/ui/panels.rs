use eframe::egui::{self, RichText, Ui};

use crate::data::filter::SortMode;
use crate::data::model::{cluster_label, CLUSTER_LABELS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – category and sort selection
// ---------------------------------------------------------------------------

/// Render the category checkboxes, sort selector and action button.
pub fn main_panel(ui: &mut Ui, state: &mut AppState) {
    // Widgets stay inert while a message is waiting to be acknowledged.
    ui.add_enabled_ui(state.message.is_none(), |ui: &mut Ui| {
        ui.add_space(12.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading("Pick the music styles you like:");
        });
        ui.add_space(12.0);

        for (id, label) in CLUSTER_LABELS {
            let mut checked = state.selection.clusters.contains(&id);
            if ui.checkbox(&mut checked, label).changed() {
                state.selection.toggle(id);
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Sort by:");
            egui::ComboBox::from_id_salt("sort_mode")
                .selected_text(state.selection.sort.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in SortMode::ALL {
                        ui.selectable_value(&mut state.selection.sort, mode, mode.label());
                    }
                });
        });

        ui.add_space(20.0);
        ui.vertical_centered(|ui: &mut Ui| {
            if ui
                .button(RichText::new("Get recommendations").heading())
                .clicked()
            {
                state.request_recommendations();
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let enabled = state.message.is_none();
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.add_enabled_ui(enabled, |ui: &mut Ui| {
            ui.menu_button("File", |ui: &mut Ui| {
                if ui.button("Upload dataset…").clicked() {
                    ui.close_menu();
                    upload_file_dialog(state);
                }
            });
        });

        ui.separator();

        match &state.dataset {
            Some(ds) => {
                let per_cluster: Vec<String> = ds
                    .cluster_counts()
                    .into_iter()
                    .map(|(id, n)| match cluster_label(id) {
                        Some(label) => format!("{label}: {n}"),
                        None => format!("cluster {id}: {n}"),
                    })
                    .collect();
                ui.label(format!("{} songs loaded ({})", ds.len(), per_cluster.join(", ")));
            }
            None => {
                ui.label("No dataset loaded");
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn upload_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select your CSV dataset")
        .add_filter("CSV Files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Uploading {}", path.display());
        state.upload_from(&path);
    }
}
