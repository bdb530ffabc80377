//! Serializable response shapes.
//!
//! Node ids appear as their external key (`node_<n>`) everywhere.

use std::collections::BTreeMap;

use serde::Serialize;

use tg_core::{AreaCategory, RoadCategory};
use tg_model::{ModelInfo, PredictionMap, Prediction, SampleRow};
use tg_network::{Edge, Node, RoadGraph};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeFeatures {
    pub area_type:    AreaCategory,
    pub capacity:     u32,
    pub signal_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub id:        String,
    pub name:      String,
    pub lat:       f64,
    pub lng:       f64,
    pub road_type: RoadCategory,
    pub features:  NodeFeatures,
}

impl From<&Node> for NodeView {
    fn from(n: &Node) -> Self {
        Self {
            id:        n.id.key(),
            name:      n.name.clone(),
            lat:       n.pos.lat,
            lng:       n.pos.lng,
            road_type: n.road,
            features:  NodeFeatures {
                area_type:    n.area,
                capacity:     n.capacity,
                signal_count: n.signal_count,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeView {
    pub source:    String,
    pub target:    String,
    /// Kilometres.
    pub distance:  f64,
    pub road_type: RoadCategory,
    pub weight:    f64,
}

impl From<&Edge> for EdgeView {
    fn from(e: &Edge) -> Self {
        Self {
            source:    e.source.key(),
            target:    e.target.key(),
            distance:  e.distance_km,
            road_type: e.road,
            weight:    e.weight,
        }
    }
}

/// `{ nodes: [...], edges: [...] }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl From<&RoadGraph> for GraphView {
    fn from(g: &RoadGraph) -> Self {
        Self {
            nodes: g.nodes().iter().map(NodeView::from).collect(),
            edges: g.edges().iter().map(EdgeView::from).collect(),
        }
    }
}

/// Predictions keyed by node key, plus the static model metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictResponse {
    pub predictions: BTreeMap<String, Prediction>,
    pub model_info:  ModelInfo,
}

impl PredictResponse {
    pub fn new(map: &PredictionMap, model_info: ModelInfo) -> Self {
        Self {
            predictions: map.iter().map(|(id, p)| (id.key(), *p)).collect(),
            model_info,
        }
    }
}

/// `{ dataset: [...], count }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SamplesView {
    pub dataset: Vec<SampleRow>,
    pub count:   usize,
}

impl From<Vec<SampleRow>> for SamplesView {
    fn from(dataset: Vec<SampleRow>) -> Self {
        let count = dataset.len();
        Self { dataset, count }
    }
}
