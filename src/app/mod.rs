pub mod directory;
pub mod publish_use_case;

pub use directory::{SearchHit, TraineeDirectory};
pub use publish_use_case::PublishUseCase;
