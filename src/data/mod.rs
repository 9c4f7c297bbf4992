/// Data layer: song types, loading, and recommendation filtering.
///
/// Architecture:
/// ```text
///  clustered_songs.csv   (written by the external clustering process)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse CSV → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Arc<Dataset> │  immutable snapshot, replaced on every load
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  selected clusters + sort mode → ordered songs
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
