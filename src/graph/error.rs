use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Vertex already exists: {0}")]
    DuplicateVertex(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
