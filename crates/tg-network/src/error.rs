//! Network-subsystem error type.

use thiserror::Error;

use tg_core::{CoreError, NodeId};

/// Errors produced by `tg-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("edge from {0} to itself")]
    SelfLoop(NodeId),

    #[error("edge {a}–{b} has non-positive distance {distance_km} km")]
    BadDistance { a: NodeId, b: NodeId, distance_km: f64 },

    #[error("{got} weight vectors supplied for {expected} nodes")]
    WeightCountMismatch { expected: usize, got: usize },

    #[error("no area anchors to synthesize around")]
    NoAnchors,
}

pub type NetworkResult<T> = Result<T, NetworkError>;
