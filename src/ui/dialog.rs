use eframe::egui::{self, Align2, Color32, RichText, Ui};

use crate::state::{AppState, Severity};

/// Render the pending message, if any, as a centred window with an OK button.
pub fn message_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(msg) = &state.message else {
        return;
    };

    let color = match msg.severity {
        Severity::Info => ctx.style().visuals.text_color(),
        Severity::Error | Severity::Fatal => Color32::RED,
    };

    let mut dismissed = false;
    egui::Window::new(msg.title.clone())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(&msg.body).color(color));
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.dismiss_message();
    }
}
