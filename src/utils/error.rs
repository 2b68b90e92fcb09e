use mongodb::bson;
use thiserror::Error;

/// Failures raised by the user store.
///
/// Handlers only tell "not found" apart from everything else, so every
/// variant here ends up as a 500 with its `Display` text as `details`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Failed to encode document: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Cast to ObjectId failed for value \"{0}\" at path \"_id\"")]
    InvalidId(String),
}
