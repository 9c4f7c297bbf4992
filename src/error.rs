use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset ingestion
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read dataset {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in {} (row {row})", path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// `found` holds the (trimmed) header names that were present.
    #[error("dataset has no '{column}' column")]
    MissingColumn { column: String, found: Vec<String> },
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecommendError {
    #[error("select at least one category")]
    NoSelection,

    #[error("no songs match the selected categories")]
    EmptyResult,
}

// ---------------------------------------------------------------------------
// Upload / clustering pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not copy {} to {}", from.display(), to.display())]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clustering command is empty")]
    EmptyCommand,

    #[error("could not start clustering command '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clustering command '{command}' failed ({status})")]
    ExternalProcess { command: String, status: ExitStatus },

    #[error(transparent)]
    Ingestion(#[from] IngestionError),
}

// ---------------------------------------------------------------------------
// Search-service lookup (always recovered by the link resolver)
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no search-service credentials configured")]
    MissingCredentials,

    #[error("search request failed: {0}")]
    Http(String),

    #[error("malformed search response: {0}")]
    Malformed(String),

    #[error("no matching track")]
    NoResults,
}

impl From<ureq::Error> for LookupError {
    fn from(e: ureq::Error) -> Self {
        LookupError::Http(e.to_string())
    }
}
