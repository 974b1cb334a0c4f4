use thiserror::Error;

/// Errors that can occur during stack operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("Stack overflow: capacity {capacity} reached")]
    Overflow { capacity: usize },

    #[error("Stack is empty")]
    Empty,
}

pub type StackResult<T> = Result<T, StackError>;
