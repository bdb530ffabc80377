//! Network synthesis configuration.

use crate::{CoreError, CoreResult};

/// Parameters for the network synthesizer in `tg-network`.
///
/// Typically left at [`Default`]; the demo binary can also load it from a
/// JSON file (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesisConfig {
    /// RNG seed.  `None` draws a fresh graph from entropy on every run.
    pub seed: Option<u64>,

    /// Inclusive bounds on the number of intersections per area anchor.
    pub min_nodes_per_anchor: u32,
    pub max_nodes_per_anchor: u32,

    /// Half-width, in degrees, of the uniform jitter applied on each axis.
    pub jitter_deg: f64,

    /// Inclusive bounds on how many nearest candidates each node considers.
    pub min_neighbors: u32,
    pub max_neighbors: u32,

    /// Candidates farther than this are never connected.
    pub max_edge_km: f64,

    /// Degree-to-kilometre scale for the planar distance.
    pub km_per_degree: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            seed:                 None,
            min_nodes_per_anchor: 4,
            max_nodes_per_anchor: 8,
            jitter_deg:           0.01,
            min_neighbors:        2,
            max_neighbors:        4,
            max_edge_km:          5.0,
            km_per_degree:        crate::geo::KM_PER_DEGREE,
        }
    }
}

impl SynthesisConfig {
    /// Largest accepted `max_nodes_per_anchor`.
    pub const MAX_NODES_PER_ANCHOR: u32 = 10_000;

    /// Default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed), ..Self::default() }
    }

    /// Reject non-positive counts and distances, inverted ranges, and node
    /// counts above [`MAX_NODES_PER_ANCHOR`](Self::MAX_NODES_PER_ANCHOR).
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_nodes_per_anchor == 0 {
            return Err(CoreError::Config("min_nodes_per_anchor must be positive".into()));
        }
        if self.min_nodes_per_anchor > self.max_nodes_per_anchor {
            return Err(CoreError::Config(format!(
                "nodes per anchor range {}..={} is inverted",
                self.min_nodes_per_anchor, self.max_nodes_per_anchor
            )));
        }
        if self.max_nodes_per_anchor > Self::MAX_NODES_PER_ANCHOR {
            return Err(CoreError::Config(format!(
                "max_nodes_per_anchor {} exceeds {}",
                self.max_nodes_per_anchor,
                Self::MAX_NODES_PER_ANCHOR
            )));
        }
        if self.min_neighbors == 0 {
            return Err(CoreError::Config("min_neighbors must be positive".into()));
        }
        if self.min_neighbors > self.max_neighbors {
            return Err(CoreError::Config(format!(
                "neighbor range {}..={} is inverted",
                self.min_neighbors, self.max_neighbors
            )));
        }
        for (name, value) in [
            ("jitter_deg", self.jitter_deg),
            ("max_edge_km", self.max_edge_km),
            ("km_per_degree", self.km_per_degree),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}
