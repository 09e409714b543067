use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload status has not been set")]
    StatusNotSet,

    #[error("payload output is not a keyed structure")]
    NotKeyed,

    #[error("payload output has no key: {0}")]
    MissingKey(String),

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
