use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::data::filter::{recommend, FilterSelection};
use crate::data::model::{Dataset, SongRecord};
use crate::error::{IngestionError, PipelineError, RecommendError};
use crate::links::resolver::LinkResolver;
use crate::pipeline;

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    /// Dismissing a fatal message closes the application.
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Message {
    fn new(severity: Severity, title: &str, body: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.to_string(),
            body: body.into(),
        }
    }
}

/// How a pipeline failure is surfaced. A failed clustering run or an
/// unusable dataset file ends the session; a failed copy or a dataset
/// without the required columns does not.
pub fn pipeline_severity(err: &PipelineError) -> Severity {
    match err {
        PipelineError::FileCopy { .. } => Severity::Error,
        PipelineError::Ingestion(IngestionError::MissingColumn { .. }) => Severity::Error,
        PipelineError::EmptyCommand
        | PipelineError::Spawn { .. }
        | PipelineError::ExternalProcess { .. }
        | PipelineError::Ingestion(_) => Severity::Fatal,
    }
}

// ---------------------------------------------------------------------------
// Result view and link requests
// ---------------------------------------------------------------------------

/// A request to open one song's link. Built per row when the row is drawn,
/// so it owns that row's title and artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub title: String,
    pub artist: String,
}

impl From<&SongRecord> for LinkRequest {
    fn from(song: &SongRecord) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
        }
    }
}

/// The secondary "recommended songs" window.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub songs: Vec<SongRecord>,
    pub open: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Current dataset snapshot (None until the first successful load).
    pub dataset: Option<Arc<Dataset>>,

    /// Ticked categories and the chosen sort mode.
    pub selection: FilterSelection,

    /// Last recommendation result, shown in its own window.
    pub results: Option<ResultView>,

    /// Modal message awaiting acknowledgement.
    pub message: Option<Message>,

    /// Set once a fatal message has been dismissed.
    pub quit_requested: bool,

    resolver: LinkResolver,
}

impl AppState {
    pub fn new(config: Config, resolver: LinkResolver) -> Self {
        let selection = FilterSelection {
            sort: config.default_sort,
            ..FilterSelection::default()
        };
        Self {
            config,
            dataset: None,
            selection,
            results: None,
            message: None,
            quit_requested: false,
            resolver,
        }
    }

    /// Initial clustering run and load.
    pub fn startup(&mut self) {
        let outcome = pipeline::regenerate(&self.config);
        self.apply_pipeline(outcome, None);
    }

    /// Copy a user-chosen CSV into place, re-run clustering and reload.
    pub fn upload_from(&mut self, src: &Path) {
        let outcome = pipeline::upload(&self.config, src);
        let done = Message::new(
            Severity::Info,
            "Dataset uploaded",
            format!("{} was clustered and loaded.", src.display()),
        );
        self.apply_pipeline(outcome, Some(done));
    }

    fn apply_pipeline(
        &mut self,
        outcome: Result<Dataset, PipelineError>,
        on_success: Option<Message>,
    ) {
        match outcome {
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.message = on_success;
            }
            Err(e) => {
                let body = error_chain(&e);
                log::error!("{body}");
                let severity = pipeline_severity(&e);
                let title = match severity {
                    Severity::Fatal => "Cannot continue",
                    _ => "Error",
                };
                self.message = Some(Message::new(severity, title, body));
            }
        }
    }

    /// Replace the dataset snapshot wholesale. Stale results are dropped.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if dataset.is_empty() {
            log::warn!("Loaded dataset contains no songs");
        }
        self.dataset = Some(Arc::new(dataset));
        self.results = None;
    }

    /// Run the filter/sort engine for the current selection.
    pub fn request_recommendations(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            self.message = Some(Message::new(
                Severity::Error,
                "Error",
                "No dataset is loaded.",
            ));
            return;
        };

        match recommend(&dataset, &self.selection.clusters, self.selection.sort) {
            Ok(songs) => {
                log::info!("{} songs recommended", songs.len());
                self.results = Some(ResultView { songs, open: true });
            }
            Err(RecommendError::NoSelection) => {
                self.message = Some(Message::new(
                    Severity::Info,
                    "Nothing selected",
                    "Select at least one category.",
                ));
            }
            Err(RecommendError::EmptyResult) => {
                self.message = Some(Message::new(
                    Severity::Info,
                    "No results",
                    "Try different filter settings.",
                ));
            }
        }
    }

    /// Resolve the URL for a clicked row.
    pub fn link_for(&self, request: &LinkRequest) -> String {
        self.resolver.resolve_link(&request.title, &request.artist)
    }

    /// Resolve and open a clicked row in the system browser.
    pub fn open_link(&self, request: &LinkRequest) {
        let url = self.link_for(request);
        log::info!("Opening {url}");
        if let Err(e) = open::that(&url) {
            log::error!("Failed to open browser for {url}: {e}");
        }
    }

    /// Acknowledge the current message.
    pub fn dismiss_message(&mut self) {
        if let Some(msg) = self.message.take() {
            if msg.severity == Severity::Fatal {
                self.quit_requested = true;
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::filter::SortMode;
    use crate::data::model::ClusterId;
    use crate::error::LookupError;
    use crate::links::MockTrackSearch;

    fn test_config(dir: &Path, command: &[&str]) -> Config {
        Config {
            upload_destination: dir.join("spotify.csv"),
            clustering_dir: dir.to_path_buf(),
            clustering_command: command.iter().map(|s| s.to_string()).collect(),
            dataset_path: dir.join("clustered_songs.csv"),
            search_host: "open.spotify.com".into(),
            default_sort: SortMode::None,
            credentials: None,
        }
    }

    fn offline_state(config: Config) -> AppState {
        let mut search = MockTrackSearch::new();
        search
            .expect_find_track_url()
            .returning(|_, _| Err(LookupError::Http("offline".into())));
        AppState::new(config, LinkResolver::new(Box::new(search), "open.spotify.com"))
    }

    fn loaded_state() -> AppState {
        let mut state = offline_state(test_config(&PathBuf::from("."), &["true"]));
        state.set_dataset(Dataset::new(vec![
            SongRecord::new("Let It Be", "Beatles", 0),
            SongRecord::new("Crazy", "Beatles", 1),
            SongRecord::new("Imagine", "Lennon", 0),
        ]));
        state
    }

    #[test]
    fn recommendations_without_dataset_show_an_error() {
        let mut state = offline_state(test_config(&PathBuf::from("."), &["true"]));
        state.selection.toggle(ClusterId(0));
        state.request_recommendations();

        assert!(state.results.is_none());
        assert_eq!(state.message.as_ref().map(|m| m.severity), Some(Severity::Error));
    }

    #[test]
    fn empty_selection_prompts_for_a_category() {
        let mut state = loaded_state();
        state.request_recommendations();

        let msg = state.message.clone().unwrap();
        assert_eq!(msg.severity, Severity::Info);
        assert_eq!(msg.title, "Nothing selected");
        assert!(state.results.is_none());
    }

    #[test]
    fn unmatched_selection_reports_no_results() {
        let mut state = loaded_state();
        state.selection.toggle(ClusterId(2));
        state.request_recommendations();

        assert_eq!(state.message.unwrap().title, "No results");
    }

    #[test]
    fn selection_opens_sorted_result_view() {
        let mut state = loaded_state();
        state.selection.toggle(ClusterId(0));
        state.selection.sort = "Title Ascending".parse().unwrap();
        state.request_recommendations();

        let view = state.results.unwrap();
        assert!(view.open);
        let titles: Vec<&str> = view.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Imagine", "Let It Be"]);
        assert!(state.message.is_none());
    }

    #[test]
    fn link_requests_carry_their_own_row() {
        let state = loaded_state();
        let requests: Vec<LinkRequest> = state
            .dataset
            .as_ref()
            .unwrap()
            .records
            .iter()
            .map(LinkRequest::from)
            .collect();

        let urls: Vec<String> = requests.iter().map(|r| state.link_for(r)).collect();
        assert_eq!(
            urls,
            [
                "https://open.spotify.com/search/Let%20It%20Be%20Beatles",
                "https://open.spotify.com/search/Crazy%20Beatles",
                "https://open.spotify.com/search/Imagine%20Lennon",
            ]
        );
    }

    #[test]
    fn new_dataset_drops_stale_results() {
        let mut state = loaded_state();
        state.selection.toggle(ClusterId(1));
        state.request_recommendations();
        assert!(state.results.is_some());

        state.set_dataset(Dataset::default());
        assert!(state.results.is_none());
    }

    #[test]
    fn failing_startup_is_fatal_and_quits_on_dismiss() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = offline_state(test_config(dir.path(), &["no-such-clustering-binary-4711"]));
        state.startup();

        assert_eq!(state.message.as_ref().unwrap().severity, Severity::Fatal);
        assert!(!state.quit_requested);
        state.dismiss_message();
        assert!(state.quit_requested);
        assert!(state.message.is_none());
    }

    #[test]
    fn configured_sort_is_preselected() {
        let mut config = test_config(&PathBuf::from("."), &["true"]);
        config.default_sort = SortMode::TitleDesc;
        let state = offline_state(config);

        assert_eq!(state.selection.sort, SortMode::TitleDesc);
        assert!(state.selection.clusters.is_empty());
    }

    #[test]
    fn error_text_includes_the_underlying_cause() {
        let err = PipelineError::FileCopy {
            from: PathBuf::from("mine.csv"),
            to: PathBuf::from("spotify.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only disk"),
        };
        assert_eq!(
            error_chain(&err),
            "could not copy mine.csv to spotify.csv: read-only disk"
        );
    }

    #[test]
    fn info_dismiss_keeps_running() {
        let mut state = loaded_state();
        state.request_recommendations();
        state.dismiss_message();
        assert!(!state.quit_requested);
    }

    #[test]
    fn copy_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = offline_state(test_config(dir.path(), &["true"]));
        state.upload_from(&dir.path().join("missing.csv"));

        let msg = state.message.unwrap();
        assert_eq!(msg.severity, Severity::Error);
        assert!(msg.body.contains("could not copy"));
    }

    #[cfg(unix)]
    #[test]
    fn missing_cluster_column_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clustered_songs.csv"), "Title,Artist\nA,B\n").unwrap();
        let mut state = offline_state(test_config(dir.path(), &["true"]));
        state.set_dataset(Dataset::new(vec![SongRecord::new("Imagine", "Lennon", 0)]));

        state.startup();

        assert_eq!(state.message.unwrap().severity, Severity::Error);
        assert_eq!(state.dataset.unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn successful_upload_replaces_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("mine.csv");
        std::fs::write(&src, "Title,Artist,Cluster\nImagine,Lennon,0\nCrazy,Beatles,1\n").unwrap();
        let mut state = offline_state(test_config(
            dir.path(),
            &["sh", "-c", "cp spotify.csv clustered_songs.csv"],
        ));

        state.upload_from(&src);

        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
        assert_eq!(state.message.unwrap().severity, Severity::Info);
    }
}
