pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod search;

pub use app::{PublishUseCase, SearchHit, TraineeDirectory};
pub use domain::{CellValue, Completion, CourseRecord, DetailBag, TraineeProfile};
pub use error::{RegistryError, Result};
pub use pipeline::ingestion::RowBatch;
pub use pipeline::processing::normalize::{NormalizedBatch, Normalizer, ProfileNormalizer};
pub use search::{find_profile, MatchRule, ProfileMatch};
