//! Error types for tree operations
//!
//! Simple, flat error hierarchy. Every variant is a programming error on the
//! caller's side; nothing here is retried.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Hierarchy request error: the new child element contains the parent")]
    HierarchyRequest,

    #[error("Not found error: the node to be removed is not a child of this node")]
    NotFound,

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DomError {
    pub(crate) fn invalid_type(expected: &str, actual: impl ToString) -> Self {
        DomError::InvalidNodeType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
