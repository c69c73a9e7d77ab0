use super::traits::ProfileStore;
use crate::domain::TraineeProfile;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory storage implementation for development/testing
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<Vec<TraineeProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<TraineeProfile>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn replace_all(&self, profiles: &[TraineeProfile]) -> Result<()> {
        let mut stored = self.profiles.write().await;
        *stored = profiles.to_vec();
        debug!("Replaced in-memory collection with {} profiles", stored.len());
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<TraineeProfile>> {
        Ok(self.profiles.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_all_supersedes_previous_collection() {
        let store = InMemoryProfileStore::with_profiles(vec![
            TraineeProfile::new("1", "قديم"),
            TraineeProfile::new("2", "قديم"),
        ]);

        store
            .replace_all(&[TraineeProfile::new("3", "جديد")])
            .await
            .unwrap();

        let stored = store.fetch_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "3");
    }
}
