use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::publish_use_case::PublishUseCase;
use crate::domain::TraineeProfile;
use crate::error::Result;
use crate::pipeline::ingestion::RowBatch;
use crate::pipeline::processing::normalize::NormalizedBatch;
use crate::pipeline::storage::ProfileStore;
use crate::search::{find_profile, MatchRule};

/// A search result detached from the working copy it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub profile: TraineeProfile,
    pub rule: MatchRule,
}

/// Session-wide working copy of the profile collection.
///
/// The copy is an immutable `Arc` snapshot: searches run against whatever
/// snapshot they grabbed, and publish/refresh swap in a new one only after
/// the store has answered successfully.
pub struct TraineeDirectory {
    store: Arc<dyn ProfileStore>,
    publisher: PublishUseCase,
    working_copy: RwLock<Arc<Vec<TraineeProfile>>>,
}

impl TraineeDirectory {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            publisher: PublishUseCase::with_default_normalizer(store.clone()),
            store,
            working_copy: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn with_publisher(store: Arc<dyn ProfileStore>, publisher: PublishUseCase) -> Self {
        Self {
            store,
            publisher,
            working_copy: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub async fn snapshot(&self) -> Arc<Vec<TraineeProfile>> {
        self.working_copy.read().await.clone()
    }

    /// Reload the working copy from the store. On failure the previous copy
    /// stays in place and the error is returned.
    pub async fn refresh(&self) -> Result<usize> {
        let profiles = match self.store.fetch_all().await {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!("Refresh failed, keeping current working copy: {}", e);
                return Err(e);
            }
        };
        let count = profiles.len();
        *self.working_copy.write().await = Arc::new(profiles);
        info!(profiles = count, "Working copy refreshed from store");
        Ok(count)
    }

    /// Publish an upload and, once the store confirms, adopt it as the
    /// working copy.
    pub async fn publish(&self, batch: &RowBatch) -> Result<NormalizedBatch> {
        let published = self.publisher.publish(batch).await?;
        *self.working_copy.write().await = Arc::new(published.profiles.clone());
        Ok(published)
    }

    pub async fn search(&self, query: &str) -> Result<Option<SearchHit>> {
        let snapshot = self.snapshot().await;
        let hit = find_profile(&snapshot, query)?.map(|m| SearchHit {
            profile: m.profile.clone(),
            rule: m.rule,
        });
        Ok(hit)
    }
}
