use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::traits::ProfileStore;
use crate::domain::TraineeProfile;
use crate::error::{RegistryError, Result};

/// Document written by [`JsonFileStore`]: one published batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub batch_id: Uuid,
    pub published_at: DateTime<Utc>,
    pub profiles: Vec<TraineeProfile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    batch_id: Uuid,
    published_at: DateTime<Utc>,
    profiles: &'a [TraineeProfile],
}

/// File-backed store. A publish writes a sibling temp file and renames it
/// over the target, so readers see either the old or the new collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file of one publish. Unique per batch, so concurrent
    /// publishes never write into each other's file.
    fn temp_path(&self, batch_id: Uuid) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "profiles.json".into());
        name.push(format!(".{}.tmp", batch_id));
        self.path.with_file_name(name)
    }

    /// The whole stored document, or `None` before the first publish.
    pub async fn snapshot(&self) -> Result<Option<StoreSnapshot>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(RegistryError::store(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let snapshot: StoreSnapshot = serde_json::from_str(&content).map_err(|e| {
            RegistryError::store(format!("Corrupt store file '{}': {}", self.path.display(), e))
        })?;
        Ok(Some(snapshot))
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn replace_all(&self, profiles: &[TraineeProfile]) -> Result<()> {
        let document = SnapshotRef {
            batch_id: Uuid::new_v4(),
            published_at: Utc::now(),
            profiles,
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RegistryError::store(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let temp = self.temp_path(document.batch_id);
        if let Err(e) = tokio::fs::write(&temp, &bytes).await {
            return Err(RegistryError::store(format!(
                "Failed to write '{}': {}",
                temp.display(),
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            warn!("Rename of {} failed, previous collection kept", temp.display());
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(RegistryError::store(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e
            )));
        }

        info!(
            batch_id = %document.batch_id,
            profiles = profiles.len(),
            "Published profile collection to {}",
            self.path.display()
        );
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<TraineeProfile>> {
        Ok(self
            .snapshot()
            .await?
            .map(|snapshot| snapshot.profiles)
            .unwrap_or_default())
    }
}
