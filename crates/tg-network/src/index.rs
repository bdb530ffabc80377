//! R-tree spatial index over intersection positions.
//!
//! Nearest-neighbour order in raw `[lat, lng]` degree space is the same as in
//! the planar-kilometre metric used for edge lengths (the scale factor is a
//! constant), so the index answers "nearest candidates" queries for the
//! synthesizer as well as position lookups for callers.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tg_core::{GeoPoint, NodeId};

/// Entry stored in the R-tree: a `[lat, lng]` point with its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in degree space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lat = self.point[0] - point[0];
        let d_lng = self.point[1] - point[1];
        d_lat * d_lat + d_lng * d_lng
    }
}

/// Bulk-loaded nearest-neighbour index.
pub struct SpatialIndex {
    tree: RTree<NodeEntry>,
}

impl SpatialIndex {
    /// Build from `(id, position)` pairs.  O(N log N).
    pub fn bulk_load<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, GeoPoint)>,
    {
        let entries: Vec<NodeEntry> = points
            .into_iter()
            .map(|(id, pos)| NodeEntry { point: [pos.lat, pos.lng], id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Every indexed node in ascending distance from `pos`, `pos`'s own node
    /// included if it is indexed.
    pub fn nearest_iter(&self, pos: GeoPoint) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.nearest_neighbor_iter(&[pos.lat, pos.lng]).map(|e| e.id)
    }

    /// The node nearest to `pos`.  `None` only if the index is empty.
    pub fn nearest(&self, pos: GeoPoint) -> Option<NodeId> {
        self.tree.nearest_neighbor(&[pos.lat, pos.lng]).map(|e| e.id)
    }

    /// Up to `k` nearest nodes to `pos`, ascending by distance.
    pub fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.nearest_iter(pos).take(k).collect()
    }
}
