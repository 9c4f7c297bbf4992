use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

use crate::data::filter::SortMode;

pub const DEFAULT_SEARCH_HOST: &str = "open.spotify.com";

/// Search-service client credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where an uploaded CSV is copied for the clustering process to read.
    pub upload_destination: PathBuf,
    /// Working directory of the clustering process.
    pub clustering_dir: PathBuf,
    /// Program followed by its arguments.
    pub clustering_command: Vec<String>,
    /// Clustered CSV produced by the clustering process.
    pub dataset_path: PathBuf,
    pub search_host: String,
    /// Sort mode preselected in the sort selector.
    pub default_sort: SortMode,
    /// `None` makes every link lookup use the fallback search URL.
    pub credentials: Option<Credentials>,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    config_from(|key| std::env::var(key).ok())
}

/// Build a [`Config`] from an arbitrary variable lookup.
pub fn config_from<F>(var: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str, default: &str| {
        var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let clustering_command: Vec<String> = get("RECOMMENDER_CLUSTER_CMD", "dotnet run")
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let credentials = match (
        var("SPOTIFY_CLIENT_ID").filter(|v| !v.is_empty()),
        var("SPOTIFY_CLIENT_SECRET").filter(|v| !v.is_empty()),
    ) {
        (Some(client_id), Some(client_secret)) => Some(Credentials {
            client_id,
            client_secret,
        }),
        (None, None) => None,
        _ => bail!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set together"),
    };

    let default_sort: SortMode = get("RECOMMENDER_SORT", SortMode::None.label())
        .parse()
        .map_err(|e| anyhow!("RECOMMENDER_SORT: {e}"))?;

    Ok(Config {
        upload_destination: get("RECOMMENDER_UPLOAD_DEST", "clustering/spotify.csv").into(),
        clustering_dir: get("RECOMMENDER_CLUSTER_DIR", "clustering").into(),
        clustering_command,
        dataset_path: get("RECOMMENDER_DATASET", "clustered_songs.csv").into(),
        search_host: get("RECOMMENDER_SEARCH_HOST", DEFAULT_SEARCH_HOST),
        default_sort,
        credentials,
    })
}
