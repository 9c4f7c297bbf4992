use eframe::egui;

use crate::state::AppState;
use crate::ui::{dialog, panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClusterTunesApp {
    pub state: AppState,
}

impl ClusterTunesApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ClusterTunesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: categories, sort, action ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::main_panel(ui, &mut self.state);
        });

        // ---- Secondary window: recommendations ----
        if let Some(request) = results::result_window(ctx, &mut self.state) {
            self.state.open_link(&request);
        }

        dialog::message_window(ctx, &mut self.state);

        if self.state.quit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
