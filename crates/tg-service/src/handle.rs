//! Atomically replaceable reference to the current graph.

use std::sync::{Arc, PoisonError, RwLock};

use tg_network::RoadGraph;

/// Shared slot holding the current [`RoadGraph`], if any.
///
/// Readers clone the `Arc` and release the lock immediately, so a long
/// prediction never blocks a swap and a swap never tears a graph a reader
/// is using.  The graph itself is immutable.
#[derive(Default)]
pub struct GraphHandle {
    current: RwLock<Option<Arc<RoadGraph>>>,
}

impl GraphHandle {
    /// A handle with no graph installed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the current graph.
    pub fn load(&self) -> Option<Arc<RoadGraph>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Install `graph`, returning the one it replaces.
    pub fn replace(&self, graph: impl Into<Arc<RoadGraph>>) -> Option<Arc<RoadGraph>> {
        let next = graph.into();
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        slot.replace(next)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
