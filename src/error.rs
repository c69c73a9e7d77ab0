use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Normalization produced no usable profile; the store must not be replaced.
    #[error("No usable trainee rows found: every row is missing a training identifier")]
    EmptyBatch,

    #[error("Invalid query: search text is empty")]
    InvalidQuery,

    #[error("Profile store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    pub fn store(message: impl Into<String>) -> Self {
        RegistryError::StoreUnavailable {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
