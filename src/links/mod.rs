/// Link resolution: song → playable web URL.
///
/// ```text
///   click on a result row (title, artist)
///        │
///        ▼
///   ┌──────────────┐   Err(LookupError)   ┌──────────────┐
///   │ TrackSearch  │ ───────────────────▶ │ fallback_url │
///   └──────────────┘                      └──────────────┘
///        │ Ok(track url)                         │
///        ▼                                       ▼
///               LinkResolver::resolve_link → String
/// ```

pub mod resolver;
pub mod spotify;

use crate::error::LookupError;

/// A search service that can map a title/artist pair to a track URL.
#[cfg_attr(test, mockall::automock)]
pub trait TrackSearch {
    fn find_track_url(&self, title: &str, artist: &str) -> Result<String, LookupError>;
}
