use thiserror::Error;

use tg_core::{CoreError, NodeId};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] CoreError),

    /// The graph has no intersections yet.
    #[error("graph is empty")]
    EmptyGraph,

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("sample count must be positive, got {0}")]
    InvalidSampleCount(usize),
}

pub type ModelResult<T> = Result<T, ModelError>;
