//! JSON file snapshot store.

use std::path::{Path, PathBuf};

use smartads_core::error::SmartadsResult;
use smartads_core::store::{Snapshot, SnapshotStore};
use tracing::warn;

use crate::error::StoreError;

/// Persists the snapshot as a single JSON file.
///
/// A missing file and malformed content both read as "no snapshot" —
/// the service starts from seeded defaults in either case. Writes go
/// through a sibling temp file and a rename so a crash mid-write
/// cannot leave a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    async fn load(&self) -> SmartadsResult<Option<Snapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::from(e).into()),
        };

        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed snapshot file, treating as absent");
                Ok(None)
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> SmartadsResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::from)?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(StoreError::from)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
