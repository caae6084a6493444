use thiserror::Error;

/// Error type for secret hashing operations.
#[derive(Debug, Clone, Error)]
pub enum HashingError {
    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),
}
