//! Index newtypes for graph elements.
//!
//! Ids are dense: a graph with `n` nodes uses `NodeId(0)..NodeId(n)`, so
//! `id.index()` addresses the graph's node `Vec` directly.  The external
//! string form (`node_<n>`) lives on [`NodeId::key`].

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for slots not yet filled.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a synthesized intersection.  Stable for the lifetime of the
    /// graph it belongs to.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of an undirected road edge.
    pub struct EdgeId(u32);
}

impl NodeId {
    /// External key used by the query layer and exports, e.g. `node_12`.
    pub fn key(self) -> String {
        format!("node_{}", self.0)
    }

    /// Inverse of [`key`](Self::key).  Returns `None` for anything that is
    /// not `node_<u32>`.
    pub fn parse_key(key: &str) -> Option<NodeId> {
        key.strip_prefix("node_")?.parse().ok().map(NodeId)
    }
}
