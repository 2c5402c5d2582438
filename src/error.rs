//! Error types for storage bindings and game entities

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// The key/value backend refused a read or write
    #[error("storage error on '{key}': {message}")]
    Storage { key: String, message: String },

    /// A stored string could not be decoded by its serializer
    #[error("could not decode '{key}': {message}")]
    Deserialize { key: String, message: String },

    /// Malformed decimal text
    #[error("invalid decimal '{0}'")]
    InvalidDecimal(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Host environment missing something (window, storage)
    #[error("platform error: {0}")]
    Platform(String),

    /// Native save file could not be read or written
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Two workers share an id, so their storage keys would collide
    #[error("duplicate worker id '{0}'")]
    DuplicateWorker(String),

    #[error("unknown worker '{0}'")]
    UnknownWorker(String),

    #[error("worker '{worker}' has no upgrade at index {index}")]
    UnknownUpgrade { worker: String, index: usize },

    /// Count too large to price
    #[error("worker '{worker}' count {count} is past the priced range")]
    CountOutOfRange { worker: String, count: String },

    #[error("no debug hook named '{0}'")]
    UnknownDebugHook(String),

    /// Mount callbacks already ran for this scope
    #[error("scope already mounted")]
    AlreadyMounted,
}

impl Error {
    /// Attach a storage key to a decode failure
    pub fn deserialize(key: &str, err: impl std::fmt::Display) -> Self {
        Error::Deserialize {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
