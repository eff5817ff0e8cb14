use thiserror::Error;

#[derive(Error, Debug)]
pub enum SovenError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Assistant already exists: {assistant} ({user})")]
    DuplicateProfile { user: String, assistant: String },

    #[error("Assistant not found: {assistant} ({user})")]
    ProfileNotFound { user: String, assistant: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SovenError>;
