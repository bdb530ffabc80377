//! The congestion scorer.
//!
//! # Per-node computation
//!
//! ```text
//! t   = time_feature(hour, day_type)          (one value per scenario)
//! wf  = weather_feature(weather)
//! af  = area_feature(node.area, hour)
//! rf  = road_feature(node.road)
//! ni  = mean over incident edges of
//!         (t + area_feature(neighbour.area, hour)) / 2 · rain / distance_km
//! raw = w·[t, wf, af, rf] + 0.3 · ni
//! c   = round3(clamp(clamp(σ(raw), 0.1, 1.0) + U[-0.05, 0.05), 0.05, 0.95))
//! ```
//!
//! Speed and wait time are derived from `c`; volume is an independent draw.
//!
//! Per-call randomness (noise and volume) comes from a [`NodeRng`] derived
//! from one call seed, so a call never shares random state with another and
//! node evaluation order does not matter.

use std::collections::BTreeMap;

use tracing::debug;

use tg_core::{NodeId, NodeRng, Scenario, SimRng};
use tg_network::{Node, RoadGraph};

use crate::features::{
    RAIN_NEIGHBOR_FACTOR, area_feature, road_feature, round_to, sigmoid, time_feature,
    weather_feature,
};
use crate::{ModelError, ModelResult};

/// Forecast for one intersection under one scenario.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Prediction {
    /// In `[0.05, 0.95]`, three decimals.
    pub congestion_level: f64,
    /// km/h, one decimal.
    pub predicted_speed:  f64,
    /// Vehicles, in `[50, 300)`.  Independent of congestion.
    pub volume:           u32,
    /// Seconds, one decimal.
    pub wait_time:        f64,
}

/// Predictions keyed by node.
pub type PredictionMap = BTreeMap<NodeId, Prediction>;

/// The deterministic part of a node's score, before noise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeatureBreakdown {
    pub time:               f64,
    pub weather:            f64,
    pub area:               f64,
    pub road:               f64,
    pub neighbor_influence: f64,
    pub raw_score:          f64,
    /// `clamp(σ(raw_score), 0.1, 1.0)`.
    pub base_level:         f64,
}

/// Scores every node of a [`RoadGraph`] for a [`Scenario`].
///
/// Stateless apart from its constants; share one instance freely.
#[derive(Clone, Debug)]
pub struct CongestionScorer {
    neighbor_coeff: f64,
    noise:          f64,
    max_speed_kmh:  f64,
    max_wait_secs:  f64,
}

impl Default for CongestionScorer {
    fn default() -> Self {
        Self {
            neighbor_coeff: 0.3,
            noise:          0.05,
            max_speed_kmh:  40.0,
            max_wait_secs:  180.0,
        }
    }
}

impl CongestionScorer {
    pub const LEVEL_BOUNDS: (f64, f64) = (0.05, 0.95);
    const BASE_BOUNDS: (f64, f64) = (0.1, 1.0);
    const VOLUME_RANGE: std::ops::Range<u32> = 50..300;

    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Predict every node of `graph`.
    ///
    /// Draws exactly one value from `rng` (the call seed).
    pub fn predict(
        &self,
        graph:    &RoadGraph,
        scenario: &Scenario,
        rng:      &mut SimRng,
    ) -> ModelResult<PredictionMap> {
        if graph.is_empty() {
            return Err(ModelError::EmptyGraph);
        }
        let call_seed: u64 = rng.random();
        let time = time_feature(scenario.hour(), scenario.day_type(), graph.profile_seed());
        debug!(%scenario, nodes = graph.node_count(), time, "scoring graph");

        #[cfg(feature = "parallel")]
        let scored: Vec<(NodeId, Prediction)> = {
            use rayon::prelude::*;
            graph
                .nodes()
                .par_iter()
                .map(|n| (n.id, self.score(graph, scenario, n, time, call_seed)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let scored: Vec<(NodeId, Prediction)> = graph
            .nodes()
            .iter()
            .map(|n| (n.id, self.score(graph, scenario, n, time, call_seed)))
            .collect();

        Ok(scored.into_iter().collect())
    }

    /// Predict one node with an explicit call seed.
    ///
    /// Equal to the node's entry in [`predict`](Self::predict) for a call
    /// that drew the same seed.
    pub fn predict_node(
        &self,
        graph:     &RoadGraph,
        scenario:  &Scenario,
        node:      NodeId,
        call_seed: u64,
    ) -> ModelResult<Prediction> {
        if graph.is_empty() {
            return Err(ModelError::EmptyGraph);
        }
        let n = graph.node(node).ok_or(ModelError::NodeNotFound(node))?;
        let time = time_feature(scenario.hour(), scenario.day_type(), graph.profile_seed());
        Ok(self.score(graph, scenario, n, time, call_seed))
    }

    /// The pre-noise features and score of `node`.
    pub fn explain(
        &self,
        graph:    &RoadGraph,
        scenario: &Scenario,
        node:     NodeId,
    ) -> ModelResult<FeatureBreakdown> {
        let n = graph.node(node).ok_or(ModelError::NodeNotFound(node))?;
        let time = time_feature(scenario.hour(), scenario.day_type(), graph.profile_seed());
        Ok(self.breakdown(graph, scenario, n, time))
    }

    /// Inverse-distance-weighted mean of the neighbours' base congestion.
    /// Zero for a node without edges.
    pub fn neighbor_influence(
        &self,
        graph:    &RoadGraph,
        scenario: &Scenario,
        node:     NodeId,
        time:     f64,
    ) -> f64 {
        let rain = if scenario.weather().is_rainy() { RAIN_NEIGHBOR_FACTOR } else { 1.0 };
        let mut sum = 0.0;
        let mut count = 0usize;
        for (neighbor, edge) in graph.neighbors(node) {
            let Some(nb) = graph.node(neighbor) else { continue };
            let base = (time + area_feature(nb.area, scenario.hour())) / 2.0;
            sum += base * rain / edge.distance_km;
            count += 1;
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn breakdown(
        &self,
        graph:    &RoadGraph,
        scenario: &Scenario,
        node:     &Node,
        time:     f64,
    ) -> FeatureBreakdown {
        let weather = weather_feature(scenario.weather());
        let area = area_feature(node.area, scenario.hour());
        let road = road_feature(node.road);
        let neighbor_influence = self.neighbor_influence(graph, scenario, node.id, time);
        let w = graph.weights(node.id).unwrap_or_default();

        let raw_score = w.time() * time
            + w.weather() * weather
            + w.area() * area
            + w.road() * road
            + self.neighbor_coeff * neighbor_influence;
        let (lo, hi) = Self::BASE_BOUNDS;

        FeatureBreakdown {
            time,
            weather,
            area,
            road,
            neighbor_influence,
            raw_score,
            base_level: sigmoid(raw_score).clamp(lo, hi),
        }
    }

    fn score(
        &self,
        graph:     &RoadGraph,
        scenario:  &Scenario,
        node:      &Node,
        time:      f64,
        call_seed: u64,
    ) -> Prediction {
        let features = self.breakdown(graph, scenario, node, time);
        let mut rng = NodeRng::new(call_seed, node.id);

        let (lo, hi) = Self::LEVEL_BOUNDS;
        let noisy = features.base_level + rng.gen_range(-self.noise..self.noise);
        let congestion_level = round_to(noisy.clamp(lo, hi), 3);

        Prediction {
            congestion_level,
            predicted_speed: round_to(self.max_speed_kmh * (1.0 - congestion_level), 1),
            volume:          rng.gen_range(Self::VOLUME_RANGE),
            wait_time:       round_to(congestion_level * self.max_wait_secs, 1),
        }
    }
}
