mod app;
mod config;
mod data;
mod error;
mod links;
mod pipeline;
mod state;
mod ui;

use anyhow::anyhow;
use app::ClusterTunesApp;
use eframe::egui;
use links::resolver::LinkResolver;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_config()?;
    log::info!(
        "Clustering with '{}' in {}",
        config.clustering_command.join(" "),
        config.clustering_dir.display()
    );
    if config.credentials.is_none() {
        log::warn!("No Spotify credentials configured; links open the search page");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Music Recommender",
        options,
        Box::new(move |_cc| {
            let resolver = LinkResolver::from_config(&config);
            let mut state = AppState::new(config, resolver);
            // Blocks until the first clustering run and load are done.
            state.startup();
            Ok(Box::new(ClusterTunesApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
}
