use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::model::{Dataset, SongRecord};
use crate::error::IngestionError;

/// Columns every clustered CSV must carry. `Cluster` is checked first since
/// its absence means the clustering step did not run on this file.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Cluster", "Title", "Artist"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a clustered song table.
///
/// Expected layout (as written by the clustering process):
///
/// ```text
/// Title,Artist,Cluster
/// "Let It Be","Beatles",0
/// ```
///
/// Header names are whitespace-trimmed; extra columns are ignored.
pub fn load(path: &Path) -> Result<Dataset, IngestionError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IngestionError::NotFound {
            path: path.to_path_buf(),
        },
        _ => IngestionError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let dataset = load_from_reader(file, path)?;
    log::info!("Loaded {} songs from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse CSV from any reader. `origin` is only used for error messages.
pub fn load_from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Dataset, IngestionError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestionError::Parse {
            path: origin.to_path_buf(),
            row: 0,
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            log::warn!("Columns in dataset: {headers:?}");
            return Err(IngestionError::MissingColumn {
                column: column.to_string(),
                found: headers,
            });
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<SongRecord>().enumerate() {
        let record = result.map_err(|source| IngestionError::Parse {
            path: origin.to_path_buf(),
            // 1-based data row, header excluded
            row: i + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(Dataset::new(records))
}
