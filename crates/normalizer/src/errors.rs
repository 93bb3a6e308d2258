use thiserror::Error;

/// Pipeline error type. Normalization itself is total and never fails;
/// these variants cover the two real failure seams: a stored payload that
/// is not a JSON object, and serde serialization of the projections.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid stored payload: {0}")]
    InvalidPayload(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
