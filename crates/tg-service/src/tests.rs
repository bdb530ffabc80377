//! Unit tests for tg-service.

use std::collections::HashSet;
use std::sync::Arc;

use tg_core::{NodeId, SynthesisConfig};

use crate::{ServiceError, TrafficService};

fn started(seed: u64) -> TrafficService {
    TrafficService::start(SynthesisConfig::seeded(seed)).unwrap()
}

// ── Readiness ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod readiness {
    use super::*;

    #[test]
    fn queries_before_synthesis_are_not_ready() {
        let svc = TrafficService::new(SynthesisConfig::seeded(1)).unwrap();
        assert!(!svc.is_ready());
        assert!(svc.get_graph().unwrap_err().is_not_ready());
        assert!(svc.predict(8, "sunny", "weekday").unwrap_err().is_not_ready());
        assert!(svc.generate_samples(10).unwrap_err().is_not_ready());
    }

    #[test]
    fn invalid_scenario_wins_over_not_ready() {
        let svc = TrafficService::new(SynthesisConfig::seeded(1)).unwrap();
        let err = svc.predict(24, "sunny", "weekday").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidScenario(_)));
        assert!(err.is_bad_request());
        assert!(!err.is_not_ready());
    }

    #[test]
    fn bad_config_fails_construction() {
        let cfg = SynthesisConfig { max_neighbors: 0, ..SynthesisConfig::seeded(1) };
        assert!(matches!(TrafficService::new(cfg), Err(ServiceError::Synthesis(_))));
    }

    #[test]
    fn start_installs_a_graph() {
        let svc = started(2);
        assert!(svc.is_ready());
        assert!(svc.graph().unwrap().node_count() >= 60);
    }
}

// ── Query operations ──────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn graph_view_uses_external_keys() {
        let svc = started(3);
        let view = svc.get_graph().unwrap();
        let graph = svc.graph().unwrap();
        assert_eq!(view.nodes.len(), graph.node_count());
        assert_eq!(view.edges.len(), graph.edge_count());
        assert_eq!(view.nodes[0].id, "node_0");
        assert_eq!(view.nodes[0].name, "MG Road Junction 1");

        let ids: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        for e in &view.edges {
            assert!(ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
            assert_eq!(e.weight, 1.0);
        }
    }

    #[test]
    fn graph_view_json_shape() {
        let svc = started(3);
        let json = serde_json::to_value(svc.get_graph().unwrap()).unwrap();
        let node = &json["nodes"][0];
        assert!(node["id"].is_string());
        assert!(node["lat"].is_f64() && node["lng"].is_f64());
        assert!(["highway", "arterial", "local"].contains(&node["road_type"].as_str().unwrap()));
        assert_eq!(node["features"]["area_type"], "commercial");
        assert!(node["features"]["capacity"].is_u64());
        if let Some(edge) = json["edges"].as_array().and_then(|e| e.first()) {
            assert!(edge["distance"].as_f64().unwrap() > 0.0);
            assert!(edge["source"].as_str().unwrap().starts_with("node_"));
        }
    }

    #[test]
    fn predict_covers_every_node_with_metadata() {
        let svc = started(4);
        let resp = svc.predict(8, "rainy", "weekday").unwrap();
        let graph = svc.graph().unwrap();
        assert_eq!(resp.predictions.len(), graph.node_count());
        for node in graph.nodes() {
            let p = resp.predictions[&node.id.key()];
            assert!((0.05..=0.95).contains(&p.congestion_level));
        }
        assert_eq!(resp.model_info.accuracy, 0.87);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["model_info"]["last_trained"], "2024-01-15");
        assert!(json["predictions"]["node_0"]["wait_time"].is_f64());
    }

    #[test]
    fn predict_rejects_bad_tokens() {
        let svc = started(4);
        for (h, w, d) in [(-1, "sunny", "weekday"), (8, "foggy", "weekday"), (8, "sunny", "monday")] {
            let err = svc.predict(h, w, d).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidScenario(_)), "{h} {w} {d}: {err}");
        }
    }

    #[test]
    fn samples_reference_current_graph() {
        let svc = started(5);
        let rows = svc.generate_samples(1000).unwrap();
        assert_eq!(rows.len(), 1000);
        let graph = svc.graph().unwrap();
        for row in &rows {
            assert!(graph.node(row.intersection_id).is_some());
            assert!(row.time_of_day <= 23);
        }
        let json = serde_json::to_value(crate::SamplesView::from(rows)).unwrap();
        assert_eq!(json["count"], 1000);
        assert!(json["dataset"][0]["intersection_id"].as_str().unwrap().starts_with("node_"));
    }

    #[test]
    fn zero_samples_is_a_bad_request() {
        let svc = started(5);
        let err = svc.generate_samples(0).unwrap_err();
        assert!(err.is_bad_request());
    }

    #[test]
    fn seeded_services_agree() {
        let a = started(6);
        let b = started(6);
        assert_eq!(a.get_graph().unwrap(), b.get_graph().unwrap());
        assert_eq!(
            a.predict(17, "sunny", "weekend").unwrap(),
            b.predict(17, "sunny", "weekend").unwrap()
        );
    }

    #[test]
    fn predict_map_keys_are_node_ids() {
        let svc = started(6);
        let scenario = tg_core::Scenario::parse(18, "sunny", "weekend").unwrap();
        let map = svc.predict_map(&scenario).unwrap();
        let graph = svc.graph().unwrap();
        assert_eq!(map.len(), graph.node_count());
        assert_eq!(map.keys().next(), Some(&NodeId(0)));
        for p in map.values() {
            assert!((0.05..=0.95).contains(&p.congestion_level));
        }
    }
}

// ── Graph replacement ─────────────────────────────────────────────────────────

#[cfg(test)]
mod replacement {
    use super::*;

    #[test]
    fn regenerate_swaps_whole_graph() {
        let svc = started(7);
        let old = svc.graph().unwrap();
        let new = svc.regenerate().unwrap();
        assert!(!Arc::ptr_eq(&old, &new));
        assert!(Arc::ptr_eq(&new, &svc.graph().unwrap()));

        // A snapshot taken before the swap is still whole and usable.
        assert!(old.node(NodeId(0)).is_some());
        let incidence: usize = old.nodes().iter().map(|n| old.degree(n.id)).sum();
        assert_eq!(incidence, 2 * old.edge_count());
    }

    #[test]
    fn concurrent_predictions_see_a_whole_graph() {
        let svc = Arc::new(started(8));
        let before = svc.graph().unwrap().node_count();

        let sizes: Vec<usize> = std::thread::scope(|s| {
            let readers: Vec<_> = (0..4)
                .map(|i| {
                    let svc = Arc::clone(&svc);
                    s.spawn(move || {
                        (0..10)
                            .map(|j| svc.predict((i * 10 + j) % 24, "sunny", "weekday").unwrap())
                            .map(|resp| resp.predictions.len())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            let writer = {
                let svc = Arc::clone(&svc);
                s.spawn(move || svc.regenerate().unwrap().node_count())
            };
            let after = writer.join().unwrap();
            let mut sizes: Vec<usize> = readers
                .into_iter()
                .flat_map(|r| r.join().unwrap())
                .collect();
            sizes.push(after);
            sizes
        });

        let after = *sizes.last().unwrap();
        for n in &sizes[..sizes.len() - 1] {
            assert!(*n == before || *n == after, "partial graph of {n} nodes");
        }
    }
}

// ── Graph handle ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle {
    use tg_core::SimRng;
    use tg_network::NetworkSynthesizer;

    use super::*;
    use crate::GraphHandle;

    fn graph(seed: u64) -> tg_network::RoadGraph {
        NetworkSynthesizer::new(SynthesisConfig::default())
            .unwrap()
            .synthesize(&mut SimRng::new(seed))
            .unwrap()
    }

    #[test]
    fn empty_handle_is_not_ready() {
        let h = GraphHandle::empty();
        assert!(!h.is_ready());
        assert!(h.load().is_none());
    }

    #[test]
    fn replace_returns_previous_graph() {
        let h = GraphHandle::empty();
        assert!(h.replace(graph(1)).is_none());
        assert!(h.is_ready());
        let first = h.load().unwrap();

        let previous = h.replace(graph(2)).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(!Arc::ptr_eq(&h.load().unwrap(), &first));
    }
}
