use crate::domain::TraineeProfile;
use crate::error::Result;
use async_trait::async_trait;

/// Durable home of the profile collection.
///
/// `replace_all` supersedes the whole stored collection in one operation;
/// there is no merge. Any failure must be reported as
/// `RegistryError::StoreUnavailable`, and after a failed `replace_all` the
/// previously stored collection is still authoritative.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn replace_all(&self, profiles: &[TraineeProfile]) -> Result<()>;
    async fn fetch_all(&self) -> Result<Vec<TraineeProfile>>;
}
