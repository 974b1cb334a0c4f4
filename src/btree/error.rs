use thiserror::Error;

/// Errors that can occur during B-tree operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BTreeError {
    #[error("Duplicate key")]
    DuplicateKey,

    #[error("Key not found")]
    KeyNotFound,

    #[error("Invalid degree: {0} (must be >= 2 and <= usize::MAX / 2)")]
    InvalidDegree(usize),

    #[error("Invalid tree state: {0}")]
    InvalidState(String),
}

impl BTreeError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

pub type BTreeResult<T> = Result<T, BTreeError>;
