//! The `TrafficService` and its query operations.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use tg_core::{Scenario, SimRng, SynthesisConfig};
use tg_model::{CongestionScorer, MODEL_INFO, PredictionMap, SampleRow};
use tg_network::{NetworkSynthesizer, RoadGraph};

use crate::{GraphHandle, GraphView, PredictResponse, ServiceError, ServiceResult};

/// Owns the current graph, the scorer, and the RNG both draw from.
///
/// `TrafficService` is `Sync`: share it behind an `Arc` and call any method
/// from any thread.  Each call forks its own RNG from the root under a short
/// lock, so concurrent calls never share random state.
pub struct TrafficService {
    graph:       GraphHandle,
    synthesizer: NetworkSynthesizer,
    scorer:      CongestionScorer,
    rng:         Mutex<SimRng>,
}

impl TrafficService {
    /// Create a service with no graph.  Queries fail with
    /// [`ServiceError::NotReady`] until [`regenerate`](Self::regenerate).
    pub fn new(config: SynthesisConfig) -> ServiceResult<Self> {
        let rng = SimRng::from_optional_seed(config.seed);
        Ok(Self {
            graph:       GraphHandle::empty(),
            synthesizer: NetworkSynthesizer::new(config)?,
            scorer:      CongestionScorer::new(),
            rng:         Mutex::new(rng),
        })
    }

    /// Create a service and synthesize its first graph.
    pub fn start(config: SynthesisConfig) -> ServiceResult<Self> {
        let service = Self::new(config)?;
        service.regenerate()?;
        Ok(service)
    }

    /// Synthesize a fresh graph and swap it in.  Returns the new graph.
    pub fn regenerate(&self) -> ServiceResult<Arc<RoadGraph>> {
        let mut rng = self.fork_rng();
        let graph = Arc::new(self.synthesizer.synthesize(&mut rng)?);
        let previous = self.graph.replace(Arc::clone(&graph));
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            replaced = previous.is_some(),
            "installed road graph"
        );
        Ok(graph)
    }

    /// Current graph snapshot, if one is installed.
    pub fn graph(&self) -> Option<Arc<RoadGraph>> {
        self.graph.load()
    }

    pub fn is_ready(&self) -> bool {
        self.graph.is_ready()
    }

    // ── Query operations ──────────────────────────────────────────────────

    /// All nodes and edges of the current graph.
    pub fn get_graph(&self) -> ServiceResult<GraphView> {
        let graph = self.current()?;
        Ok(GraphView::from(graph.as_ref()))
    }

    /// Predict every node for a scenario given as raw request values.
    ///
    /// The scenario is validated before the graph is consulted.
    pub fn predict(&self, hour: i64, weather: &str, day_type: &str) -> ServiceResult<PredictResponse> {
        let scenario = Scenario::parse(hour, weather, day_type)?;
        self.predict_scenario(&scenario)
    }

    pub fn predict_scenario(&self, scenario: &Scenario) -> ServiceResult<PredictResponse> {
        let map = self.predict_map(scenario)?;
        Ok(PredictResponse::new(&map, MODEL_INFO))
    }

    /// Per-node predictions keyed by [`NodeId`](tg_core::NodeId), for export.
    pub fn predict_map(&self, scenario: &Scenario) -> ServiceResult<PredictionMap> {
        let graph = self.current()?;
        let mut rng = self.fork_rng();
        let map = self.scorer.predict(&graph, scenario, &mut rng)?;
        debug!(%scenario, nodes = map.len(), "served prediction");
        Ok(map)
    }

    /// `count` independent labeled rows.  `count` must be positive.
    pub fn generate_samples(&self, count: usize) -> ServiceResult<Vec<SampleRow>> {
        if count == 0 {
            return Err(ServiceError::InvalidRequest("sample count must be positive".into()));
        }
        let graph = self.current()?;
        let mut rng = self.fork_rng();
        let rows = self.scorer.generate_samples(&graph, count, &mut rng)?;
        debug!(rows = rows.len(), "served samples");
        Ok(rows)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn current(&self) -> ServiceResult<Arc<RoadGraph>> {
        self.graph.load().ok_or(ServiceError::NotReady)
    }

    fn fork_rng(&self) -> SimRng {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner).child(0)
    }
}
