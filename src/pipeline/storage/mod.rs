// Profile store adapters: replace-all publish and fetch-all read

pub mod in_memory;
pub mod json_file;
pub mod traits;

pub use in_memory::InMemoryProfileStore;
pub use json_file::{JsonFileStore, StoreSnapshot};
pub use traits::ProfileStore;
