use thiserror::Error;

use crate::btree::BTreeError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("{command} expects {expected}")]
    Arity {
        command: String,
        expected: &'static str,
    },

    #[error("B-tree error: {0}")]
    BTree(#[from] BTreeError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
