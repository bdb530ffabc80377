//! Procedural network synthesis.
//!
//! # Algorithm
//!
//! ```text
//! ① Nodes    — for each anchor: draw n ∈ [min, max]; each node sits at the
//!              anchor plus uniform jitter on both axes, with a road category
//!              drawn from the anchor's road mix, capacity ∈ [100, 500) and
//!              signal count ∈ [2, 7).
//! ② Edges    — for each node in id order: draw k ∈ [min, max] (capped at the
//!              number of other nodes), walk its k nearest other nodes and
//!              connect every one closer than the cutoff, with a uniformly
//!              random road category, unless the pair is already connected.
//! ③ Weights  — four uniform coefficients in [-1, 1] per node, then one
//!              profile seed for the graph.
//! ```
//!
//! Step ② is greedy and node-local: the result is not guaranteed connected
//! and degrees are uneven (a hub can collect edges from many nodes that all
//! see it among their nearest).  The scorer's neighbour term depends on that
//! shape, so it is kept as is.

use rand::distributions::{Distribution, WeightedIndex};
use tracing::{debug, info};

use tg_core::{AreaCategory, CoreError, NodeId, RoadCategory, SimRng, SynthesisConfig};

use crate::{AreaAnchor, ANCHORS, GraphBuilder, NetworkResult, NodeAttrs, NodeWeights, RoadGraph};

/// Intersection capacity, half-open.
const CAPACITY_RANGE: std::ops::Range<u32> = 100..500;
/// Traffic signals per intersection, half-open.
const SIGNAL_RANGE: std::ops::Range<u32> = 2..7;
/// Bound of the uniform model coefficients, inclusive on both sides.
const WEIGHT_BOUND: f64 = 1.0;

/// Builds a fresh [`RoadGraph`] around a set of area anchors.
///
/// # Example
///
/// ```
/// use tg_core::{SimRng, SynthesisConfig};
/// use tg_network::NetworkSynthesizer;
///
/// let synth = NetworkSynthesizer::new(SynthesisConfig::default()).unwrap();
/// let graph = synth.synthesize(&mut SimRng::new(42)).unwrap();
/// assert!(graph.node_count() >= 15 * 4);
/// ```
pub struct NetworkSynthesizer {
    config:  SynthesisConfig,
    anchors: Vec<AreaAnchor>,
}

impl NetworkSynthesizer {
    /// Validate `config` and use the built-in [`ANCHORS`].
    pub fn new(config: SynthesisConfig) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self { config, anchors: ANCHORS.to_vec() })
    }

    /// Replace the anchor table.  Must not be empty.
    pub fn with_anchors(mut self, anchors: Vec<AreaAnchor>) -> NetworkResult<Self> {
        if anchors.is_empty() {
            return Err(crate::NetworkError::NoAnchors);
        }
        self.anchors = anchors;
        Ok(self)
    }

    /// Synthesize with an RNG built from `config.seed` (entropy if `None`).
    pub fn generate(&self) -> NetworkResult<RoadGraph> {
        let mut rng = SimRng::from_optional_seed(self.config.seed);
        self.synthesize(&mut rng)
    }

    /// Run all three synthesis steps, drawing from `rng`.
    pub fn synthesize(&self, rng: &mut SimRng) -> NetworkResult<RoadGraph> {
        let cfg = &self.config;
        let mut builder = GraphBuilder::new();

        // ── ① Nodes ───────────────────────────────────────────────────────
        let residential = road_distribution(AreaCategory::Residential)?;
        let other = road_distribution(AreaCategory::Mixed)?;

        for anchor in &self.anchors {
            let mix = if anchor.area == AreaCategory::Residential { &residential } else { &other };
            let count = rng.gen_range(cfg.min_nodes_per_anchor..=cfg.max_nodes_per_anchor);
            for i in 0..count {
                let d_lat = rng.gen_range(-cfg.jitter_deg..=cfg.jitter_deg);
                let d_lng = rng.gen_range(-cfg.jitter_deg..=cfg.jitter_deg);
                let road = RoadCategory::KNOWN[mix.sample(rng.inner())];
                builder.add_node(NodeAttrs {
                    name:         format!("{} Junction {}", anchor.name, i + 1),
                    pos:          anchor.pos.offset(d_lat, d_lng),
                    road,
                    capacity:     rng.gen_range(CAPACITY_RANGE),
                    signal_count: rng.gen_range(SIGNAL_RANGE),
                    area:         anchor.area,
                });
            }
            debug!(anchor = anchor.name, area = %anchor.area, count, "placed intersections");
        }

        // ── ② Edges ───────────────────────────────────────────────────────
        let index = builder.spatial_index();
        let node_count = builder.node_count();
        let others = node_count.saturating_sub(1);
        // Reserve from the placed node count, never from the raw config bound.
        builder.reserve_edges(node_count * (cfg.max_neighbors as usize).min(others));
        let mut skipped_far = 0usize;
        let mut skipped_dup = 0usize;

        for i in 0..node_count {
            let node = NodeId(i as u32);
            let Some(pos) = builder.node_pos(node) else { continue };
            if others == 0 {
                break;
            }
            let hi = (cfg.max_neighbors as usize).min(others);
            let lo = (cfg.min_neighbors as usize).min(hi);
            let k = rng.gen_range(lo..=hi);

            let candidates: Vec<NodeId> =
                index.nearest_iter(pos).filter(|&n| n != node).take(k).collect();
            for target in candidates {
                let Some(target_pos) = builder.node_pos(target) else { continue };
                let distance_km = pos.planar_km(target_pos, cfg.km_per_degree);
                // Coincident points have no usable length; treat them as out
                // of range rather than store a zero-length road.
                if !(distance_km > 0.0 && distance_km < cfg.max_edge_km) {
                    skipped_far += 1;
                    continue;
                }
                if builder.has_edge(node, target) {
                    skipped_dup += 1;
                    continue;
                }
                let road = RoadCategory::KNOWN[rng.gen_range(0..RoadCategory::KNOWN.len())];
                builder.add_edge(node, target, distance_km, road)?;
            }
        }

        // ── ③ Weights ─────────────────────────────────────────────────────
        let weights: Vec<NodeWeights> = (0..node_count)
            .map(|_| {
                NodeWeights(std::array::from_fn(|_| {
                    rng.gen_range(-WEIGHT_BOUND..=WEIGHT_BOUND)
                }))
            })
            .collect();
        let profile_seed: u64 = rng.random();

        let edge_count = builder.edge_count();
        let graph = builder
            .weights(weights)
            .profile_seed(profile_seed)
            .spatial(index)
            .build()?;

        info!(
            anchors = self.anchors.len(),
            nodes = node_count,
            edges = edge_count,
            skipped_far,
            skipped_dup,
            "synthesized road graph"
        );
        Ok(graph)
    }
}

/// Weighted road-category distribution for an area.
fn road_distribution(area: AreaCategory) -> NetworkResult<WeightedIndex<f64>> {
    WeightedIndex::new(crate::anchor::road_mix(area))
        .map_err(|e| CoreError::Config(format!("road mix for {area}: {e}")).into())
}
