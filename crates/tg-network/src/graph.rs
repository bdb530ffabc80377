//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Nodes and undirected edges are stored in `Vec`s indexed by `NodeId` and
//! `EdgeId`.  Each edge is stored once, as `(source, target)` in the order it
//! was first created; `(target, source)` is the same edge and is rejected by
//! the builder.
//!
//! Incidence uses **Compressed Sparse Row (CSR)** format.  Given a
//! `NodeId n`, the edges touching it occupy:
//!
//! ```text
//! incident[ incident_start[n] .. incident_start[n+1] ]
//! ```
//!
//! so iterating a node's neighbours during scoring is a contiguous scan.
//!
//! A `RoadGraph` is immutable once built.  Regeneration produces a new graph;
//! callers that share one swap the whole value (see `tg-service`).

use rustc_hash::FxHashSet;

use tg_core::{AreaCategory, EdgeId, GeoPoint, NodeId, RoadCategory};

use crate::{NetworkError, NetworkResult, SpatialIndex};

// ── Node / Edge ───────────────────────────────────────────────────────────────

/// A synthesized intersection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub id:           NodeId,
    /// `<anchor> Junction <n>`, 1-based within the anchor.
    pub name:         String,
    pub pos:          GeoPoint,
    pub road:         RoadCategory,
    pub capacity:     u32,
    pub signal_count: u32,
    /// Inherited from the node's anchor.
    pub area:         AreaCategory,
}

/// Node attributes supplied to [`GraphBuilder::add_node`]; the builder
/// assigns the id.
#[derive(Clone, Debug)]
pub struct NodeAttrs {
    pub name:         String,
    pub pos:          GeoPoint,
    pub road:         RoadCategory,
    pub capacity:     u32,
    pub signal_count: u32,
    pub area:         AreaCategory,
}

/// An undirected road between two intersections.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    pub source:      NodeId,
    pub target:      NodeId,
    /// Planar length in kilometres.  Always positive.
    pub distance_km: f64,
    pub road:        RoadCategory,
    /// Scoring weight.  Constant for now.
    pub weight:      f64,
}

impl Edge {
    /// Weight given to every synthesized edge.
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// The endpoint that is not `node`.  `node` must be one of the two.
    #[inline]
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.source == node { self.target } else { self.source }
    }

    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// The per-node coefficients `[time, weather, area, road]` of the congestion
/// model.  Drawn once at synthesis and fixed for the graph's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeWeights(pub [f64; 4]);

impl NodeWeights {
    pub const ZERO: NodeWeights = NodeWeights([0.0; 4]);

    #[inline] pub fn time(&self)    -> f64 { self.0[0] }
    #[inline] pub fn weather(&self) -> f64 { self.0[1] }
    #[inline] pub fn area(&self)    -> f64 { self.0[2] }
    #[inline] pub fn road(&self)    -> f64 { self.0[3] }
}

/// Canonical key for an unordered node pair.
#[inline]
fn pair_key(a: NodeId, b: NodeId) -> (u32, u32) {
    if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable intersection graph with its model weights.
///
/// Do not construct directly; use [`GraphBuilder`] or
/// [`NetworkSynthesizer`](crate::NetworkSynthesizer).
pub struct RoadGraph {
    nodes:          Vec<Node>,
    edges:          Vec<Edge>,
    weights:        Vec<NodeWeights>,
    profile_seed:   u64,
    incident_start: Vec<u32>,
    incident:       Vec<EdgeId>,
    spatial_idx:    SpatialIndex,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Element access ────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Model coefficients of `id`.
    pub fn weights(&self, id: NodeId) -> Option<NodeWeights> {
        self.weights.get(id.index()).copied()
    }

    /// Seed of the graph's time-of-day profile, drawn at synthesis.
    pub fn profile_seed(&self) -> u64 {
        self.profile_seed
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `EdgeId`s of every edge touching `node`, in creation order.
    ///
    /// Empty for unknown nodes.
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        let i = node.index();
        if i >= self.nodes.len() {
            return &[];
        }
        let start = self.incident_start[i] as usize;
        let end   = self.incident_start[i + 1] as usize;
        &self.incident[start..end]
    }

    /// `(neighbour, connecting edge)` for every edge touching `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.incident_edges(node).iter().map(move |&e| {
            let edge = &self.edges[e.index()];
            (edge.other(node), edge)
        })
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.incident_edges(node).len()
    }

    /// `true` if an edge joins `a` and `b` in either direction.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).any(|(n, _)| n == b)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The intersection nearest to `pos`.  `None` only for an empty graph.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx.nearest(pos)
    }

    /// Up to `k` intersections nearest to `pos`, ascending by distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx.k_nearest(pos, k)
    }
}

impl std::fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tg_core::{AreaCategory, GeoPoint, RoadCategory};
/// use tg_network::{GraphBuilder, NodeAttrs};
///
/// let attrs = |lat| NodeAttrs {
///     name:         "Test Junction".into(),
///     pos:          GeoPoint::new(lat, 77.6),
///     road:         RoadCategory::Local,
///     capacity:     200,
///     signal_count: 3,
///     area:         AreaCategory::Mixed,
/// };
/// let mut b = GraphBuilder::new();
/// let a = b.add_node(attrs(12.90));
/// let c = b.add_node(attrs(12.91));
/// assert!(b.add_edge(a, c, 1.11, RoadCategory::Arterial).unwrap());
/// assert!(!b.add_edge(c, a, 1.11, RoadCategory::Arterial).unwrap()); // same edge
/// let graph = b.build().unwrap();
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub struct GraphBuilder {
    nodes:        Vec<Node>,
    edges:        Vec<Edge>,
    pairs:        FxHashSet<(u32, u32)>,
    weights:      Option<Vec<NodeWeights>>,
    profile_seed: u64,
    spatial:      Option<SpatialIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:        Vec::new(),
            edges:        Vec::new(),
            pairs:        FxHashSet::default(),
            weights:      None,
            profile_seed: 0,
            spatial:      None,
        }
    }

    /// Reserve room for `additional` more edges.
    pub fn reserve_edges(&mut self, additional: usize) {
        self.edges.reserve(additional);
        self.pairs.reserve(additional);
    }

    /// Add an intersection and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, attrs: NodeAttrs) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name:         attrs.name,
            pos:          attrs.pos,
            road:         attrs.road,
            capacity:     attrs.capacity,
            signal_count: attrs.signal_count,
            area:         attrs.area,
        });
        id
    }

    /// Add the undirected edge `a`–`b`.
    ///
    /// Returns `Ok(false)` without storing anything if the pair is already
    /// connected in either direction.
    pub fn add_edge(
        &mut self,
        a:           NodeId,
        b:           NodeId,
        distance_km: f64,
        road:        RoadCategory,
    ) -> NetworkResult<bool> {
        for n in [a, b] {
            if n.index() >= self.nodes.len() {
                return Err(NetworkError::NodeNotFound(n));
            }
        }
        if a == b {
            return Err(NetworkError::SelfLoop(a));
        }
        if !(distance_km.is_finite() && distance_km > 0.0) {
            return Err(NetworkError::BadDistance { a, b, distance_km });
        }
        if !self.pairs.insert(pair_key(a, b)) {
            return Ok(false);
        }
        self.edges.push(Edge {
            source: a,
            target: b,
            distance_km,
            road,
            weight: Edge::DEFAULT_WEIGHT,
        });
        Ok(true)
    }

    /// `true` if `a`–`b` has been added in either direction.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    /// Supply the model coefficients, one per node in `NodeId` order.
    ///
    /// If never called, every node gets [`NodeWeights::ZERO`].
    pub fn weights(mut self, weights: Vec<NodeWeights>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn profile_seed(mut self, seed: u64) -> Self {
        self.profile_seed = seed;
        self
    }

    /// Hand over an index built by [`spatial_index`](Self::spatial_index)
    /// so that `build` does not load the R-tree again.  Ignored if nodes were
    /// added after it was built.
    pub fn spatial(mut self, index: SpatialIndex) -> Self {
        self.spatial = Some(index);
        self
    }

    /// Look up the position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.nodes.get(id.index()).map(|n| n.pos)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Spatial index over the nodes added so far.
    pub fn spatial_index(&self) -> SpatialIndex {
        SpatialIndex::bulk_load(self.nodes.iter().map(|n| (n.id, n.pos)))
    }

    /// Consume the builder and produce a [`RoadGraph`].
    pub fn build(self) -> NetworkResult<RoadGraph> {
        let node_count = self.nodes.len();

        let weights = match self.weights {
            Some(w) if w.len() != node_count => {
                return Err(NetworkError::WeightCountMismatch {
                    expected: node_count,
                    got:      w.len(),
                });
            }
            Some(w) => w,
            None    => vec![NodeWeights::ZERO; node_count],
        };

        // CSR incidence: each edge appears under both endpoints.
        let mut incident_start = vec![0u32; node_count + 1];
        for e in &self.edges {
            incident_start[e.source.index() + 1] += 1;
            incident_start[e.target.index() + 1] += 1;
        }
        for i in 1..=node_count {
            incident_start[i] += incident_start[i - 1];
        }
        let mut cursor: Vec<u32> = incident_start[..node_count].to_vec();
        let mut incident = vec![EdgeId::INVALID; self.edges.len() * 2];
        for (i, e) in self.edges.iter().enumerate() {
            for n in [e.source, e.target] {
                let slot = &mut cursor[n.index()];
                incident[*slot as usize] = EdgeId(i as u32);
                *slot += 1;
            }
        }
        debug_assert!(incident.iter().all(|&e| e != EdgeId::INVALID));

        let spatial_idx = match self.spatial {
            Some(index) if index.len() == node_count => index,
            _ => SpatialIndex::bulk_load(self.nodes.iter().map(|n| (n.id, n.pos))),
        };

        Ok(RoadGraph {
            nodes: self.nodes,
            edges: self.edges,
            weights,
            profile_seed: self.profile_seed,
            incident_start,
            incident,
            spatial_idx,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
