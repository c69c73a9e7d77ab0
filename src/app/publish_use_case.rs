use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::{RegistryError, Result};
use crate::observability::metrics;
use crate::pipeline::ingestion::RowBatch;
use crate::pipeline::processing::normalize::{NormalizedBatch, Normalizer, ProfileNormalizer};
use crate::pipeline::storage::ProfileStore;

/// Use case for publishing an upload: normalize, refuse empty results, then
/// replace the stored collection in one operation.
pub struct PublishUseCase {
    normalizer: Box<dyn Normalizer + Send + Sync>,
    store: Arc<dyn ProfileStore>,
}

impl PublishUseCase {
    pub fn new(normalizer: Box<dyn Normalizer + Send + Sync>, store: Arc<dyn ProfileStore>) -> Self {
        Self { normalizer, store }
    }

    /// Create a use case with the keyword-driven profile normalizer
    pub fn with_default_normalizer(store: Arc<dyn ProfileStore>) -> Self {
        Self::new(Box::new(ProfileNormalizer::new()), store)
    }

    /// Normalize without publishing. Fails with `EmptyBatch` when no row
    /// produced a profile.
    pub fn prepare(&self, batch: &RowBatch) -> Result<NormalizedBatch> {
        let normalized = self.normalizer.normalize(batch);
        if normalized.is_empty() {
            warn!(rows = batch.len(), "Upload produced no usable profiles, nothing published");
            metrics::publish::empty_batch();
            return Err(RegistryError::EmptyBatch);
        }
        Ok(normalized)
    }

    pub async fn publish(&self, batch: &RowBatch) -> Result<NormalizedBatch> {
        let normalized = self.prepare(batch)?;

        if let Err(e) = self.store.replace_all(&normalized.profiles).await {
            error!("Publish failed, stored collection unchanged: {}", e);
            metrics::publish::store_error();
            return Err(e);
        }

        metrics::publish::success();
        info!(profiles = normalized.profiles.len(), "Publish complete");
        Ok(normalized)
    }
}
