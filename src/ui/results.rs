use eframe::egui::{self, CursorIcon, Label, ScrollArea, Sense, Ui};

use crate::state::{AppState, LinkRequest};

/// Render the recommended-songs window. Returns the row the user clicked,
/// if any; the link is resolved by the caller after drawing.
pub fn result_window(ctx: &egui::Context, state: &mut AppState) -> Option<LinkRequest> {
    let view = state.results.as_mut()?;
    if !view.open {
        return None;
    }

    let mut open = view.open;
    let mut clicked = None;
    let songs = &view.songs;

    egui::Window::new("Recommended songs")
        .open(&mut open)
        .default_size([600.0, 500.0])
        .show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for (i, song) in songs.iter().enumerate() {
                        let text = format!("{}. {} - {}", i + 1, song.title, song.artist);
                        let row = ui
                            .add(Label::new(text).sense(Sense::click()))
                            .on_hover_cursor(CursorIcon::PointingHand);
                        if row.clicked() {
                            clicked = Some(LinkRequest::from(song));
                        }
                    }
                });
        });

    view.open = open;
    clicked
}
