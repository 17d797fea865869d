use std::path::{Path, PathBuf};

use shared_types::{places_to_csv, MapSession, Place, EXPORT_FILENAME};
use tracing::info;

use crate::error::PlacesError;

/// Writes `places` as the export CSV into `dir`, returning the file path.
pub async fn export_to_file(places: &[Place], dir: &Path) -> Result<PathBuf, PlacesError> {
    let document = places_to_csv(places)?;
    let path = dir.join(EXPORT_FILENAME);

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, document).await?;

    info!(path = %path.display(), rows = places.len(), "Exported places to CSV");
    Ok(path)
}

/// Exports whatever the session currently shows.
pub async fn export_session(session: &MapSession, dir: &Path) -> Result<PathBuf, PlacesError> {
    export_to_file(session.places(), dir).await
}
