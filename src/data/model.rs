use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ClusterId – category assigned by the external clustering step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u8);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed category names, in checkbox order.
pub const CLUSTER_LABELS: [(ClusterId, &str); 3] = [
    (ClusterId(0), "Calm songs"),
    (ClusterId(1), "Energetic hits"),
    (ClusterId(2), "Dance songs"),
];

/// Human-readable name of a cluster, if it is one of the known categories.
pub fn cluster_label(id: ClusterId) -> Option<&'static str> {
    CLUSTER_LABELS
        .iter()
        .find(|(c, _)| *c == id)
        .map(|(_, label)| *label)
}

// ---------------------------------------------------------------------------
// SongRecord – one row of the clustered CSV
// ---------------------------------------------------------------------------

/// A single song. Identity is positional; there is no stable key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Cluster")]
    pub cluster: ClusterId,
}

impl SongRecord {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, cluster: u8) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            cluster: ClusterId(cluster),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Immutable snapshot of a loaded dataset. A new load replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub records: Vec<SongRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SongRecord>) -> Self {
        Self { records }
    }

    /// Number of songs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Songs per cluster id, for the status line.
    pub fn cluster_counts(&self) -> BTreeMap<ClusterId, usize> {
        let mut counts = BTreeMap::new();
        for rec in &self.records {
            *counts.entry(rec.cluster).or_default() += 1;
        }
        counts
    }
}
