use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::model::{ClusterId, Dataset, SongRecord};
use crate::error::RecommendError;

// ---------------------------------------------------------------------------
// Sort mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    ArtistAsc,
    ArtistDesc,
}

impl SortMode {
    /// Selector order.
    pub const ALL: [SortMode; 5] = [
        SortMode::None,
        SortMode::TitleAsc,
        SortMode::TitleDesc,
        SortMode::ArtistAsc,
        SortMode::ArtistDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "None",
            SortMode::TitleAsc => "Title Ascending",
            SortMode::TitleDesc => "Title Descending",
            SortMode::ArtistAsc => "Artist Ascending",
            SortMode::ArtistDesc => "Artist Descending",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a selector label, case-insensitively. Used for the configured
/// default sort mode.
impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort mode '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Filter selection: chosen categories + sort mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub clusters: BTreeSet<ClusterId>,
    pub sort: SortMode,
}

impl FilterSelection {
    pub fn toggle(&mut self, id: ClusterId) {
        if !self.clusters.remove(&id) {
            self.clusters.insert(id);
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Songs whose cluster is in `selected`, in the requested order.
///
/// * Empty `selected` → [`RecommendError::NoSelection`]
/// * Nothing matches → [`RecommendError::EmptyResult`]
///
/// Sorting is stable: songs with equal keys keep their dataset order, in
/// both directions.
pub fn recommend(
    dataset: &Dataset,
    selected: &BTreeSet<ClusterId>,
    sort: SortMode,
) -> Result<Vec<SongRecord>, RecommendError> {
    if selected.is_empty() {
        return Err(RecommendError::NoSelection);
    }

    let mut songs: Vec<SongRecord> = dataset
        .records
        .iter()
        .filter(|rec| selected.contains(&rec.cluster))
        .cloned()
        .collect();

    if songs.is_empty() {
        return Err(RecommendError::EmptyResult);
    }

    match sort {
        SortMode::None => {}
        SortMode::TitleAsc => songs.sort_by(|a, b| a.title.cmp(&b.title)),
        SortMode::TitleDesc => songs.sort_by(|a, b| b.title.cmp(&a.title)),
        SortMode::ArtistAsc => songs.sort_by(|a, b| a.artist.cmp(&b.artist)),
        SortMode::ArtistDesc => songs.sort_by(|a, b| b.artist.cmp(&a.artist)),
    }

    Ok(songs)
}
