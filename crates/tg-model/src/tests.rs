//! Unit tests for tg-model.

#[cfg(test)]
mod helpers {
    use tg_core::{AreaCategory, GeoPoint, RoadCategory, SimRng, SynthesisConfig};
    use tg_network::{GraphBuilder, NetworkSynthesizer, NodeAttrs, NodeWeights, RoadGraph};

    pub fn attrs(area: AreaCategory, road: RoadCategory, lng: f64) -> NodeAttrs {
        NodeAttrs {
            name:         format!("{area} Junction"),
            pos:          GeoPoint::new(12.9, lng),
            road,
            capacity:     300,
            signal_count: 3,
            area,
        }
    }

    /// ```text
    ///   1 (mixed) —1.0 km— 0 (tech hub) —2.0 km— 2 (junction)      3 (residential)
    /// ```
    /// All weights zero unless `weights` says otherwise.
    pub fn tiny_graph(weights: Option<[NodeWeights; 4]>) -> RoadGraph {
        let mut b = GraphBuilder::new();
        let n0 = b.add_node(attrs(AreaCategory::TechHub, RoadCategory::Highway, 77.60));
        let n1 = b.add_node(attrs(AreaCategory::Mixed, RoadCategory::Local, 77.59));
        let n2 = b.add_node(attrs(AreaCategory::Junction, RoadCategory::Arterial, 77.62));
        b.add_node(attrs(AreaCategory::Residential, RoadCategory::Local, 77.80));
        b.add_edge(n0, n1, 1.0, RoadCategory::Local).unwrap();
        b.add_edge(n2, n0, 2.0, RoadCategory::Arterial).unwrap();
        let b = match weights {
            Some(w) => b.weights(w.to_vec()),
            None => b,
        };
        b.profile_seed(11).build().unwrap()
    }

    pub fn synthesized(seed: u64) -> RoadGraph {
        NetworkSynthesizer::new(SynthesisConfig::default())
            .unwrap()
            .synthesize(&mut SimRng::new(seed))
            .unwrap()
    }
}

// ── Feature functions ─────────────────────────────────────────────────────────

#[cfg(test)]
mod features {
    use tg_core::{AreaCategory, DayType, RoadCategory, Weather};

    use crate::features::{
        area_feature, road_feature, round_to, sigmoid, time_band, time_feature, weather_feature,
    };

    #[test]
    fn weekday_bands_are_inclusive() {
        for h in [7, 8, 10, 17, 20] {
            assert_eq!(time_band(h, DayType::Weekday), 0.8..1.0, "hour {h}");
        }
        for h in [11, 16] {
            assert_eq!(time_band(h, DayType::Weekday), 0.4..0.6, "hour {h}");
        }
        for h in [0, 6, 21, 23] {
            assert_eq!(time_band(h, DayType::Weekday), 0.1..0.3, "hour {h}");
        }
    }

    #[test]
    fn weekend_bands() {
        for h in [10, 12, 14] {
            assert_eq!(time_band(h, DayType::Weekend), 0.5..0.7);
        }
        for h in [8, 9, 15, 18] {
            assert_eq!(time_band(h, DayType::Weekend), 0.2..0.4);
        }
    }

    #[test]
    fn time_feature_is_in_band_and_stable_per_scenario() {
        for seed in 0..20 {
            for h in 0..24 {
                for day in [DayType::Weekday, DayType::Weekend] {
                    let t = time_feature(h, day, seed);
                    assert!(time_band(h, day).contains(&t));
                    assert_eq!(t, time_feature(h, day, seed));
                }
            }
        }
    }

    #[test]
    fn time_feature_varies_between_graphs() {
        let values: Vec<f64> = (0..10).map(|s| time_feature(8, DayType::Weekday, s)).collect();
        assert!(values.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn rain_never_lowers_weather_feature() {
        assert_eq!(weather_feature(Weather::Rainy), 1.3);
        assert_eq!(weather_feature(Weather::Sunny), 1.0);
        assert!(weather_feature(Weather::Rainy) >= weather_feature(Weather::Sunny));
    }

    #[test]
    fn rush_hour_area_factors() {
        assert_eq!(area_feature(AreaCategory::TechHub, 8), 1.3);
        assert_eq!(area_feature(AreaCategory::Residential, 8), 1.1);
    }

    #[test]
    fn area_factor_windows() {
        assert_eq!(area_feature(AreaCategory::Commercial, 9), 1.2);
        assert_eq!(area_feature(AreaCategory::Commercial, 21), 1.2);
        assert_eq!(area_feature(AreaCategory::Commercial, 8), 0.8);
        assert_eq!(area_feature(AreaCategory::Commercial, 22), 0.8);

        assert_eq!(area_feature(AreaCategory::TechHub, 19), 1.3);
        assert_eq!(area_feature(AreaCategory::TechHub, 7), 0.7);
        assert_eq!(area_feature(AreaCategory::TechHub, 20), 0.7);

        assert_eq!(area_feature(AreaCategory::Residential, 6), 1.1);
        assert_eq!(area_feature(AreaCategory::Residential, 22), 1.1);
        assert_eq!(area_feature(AreaCategory::Residential, 12), 0.9);
        assert_eq!(area_feature(AreaCategory::Residential, 23), 0.9);

        for h in 0..24 {
            assert_eq!(area_feature(AreaCategory::Mixed, h), 1.0);
            assert_eq!(area_feature(AreaCategory::Junction, h), 1.1);
            assert_eq!(area_feature(AreaCategory::Unknown, h), 1.0);
        }
    }

    #[test]
    fn road_factors() {
        assert_eq!(road_feature(RoadCategory::Highway), 1.2);
        assert_eq!(road_feature(RoadCategory::Arterial), 1.0);
        assert_eq!(road_feature(RoadCategory::Local), 0.8);
        assert_eq!(road_feature(RoadCategory::Unknown), 1.0);
    }

    #[test]
    fn numeric_helpers() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99 && sigmoid(-10.0) < 0.01);
        assert_eq!(round_to(0.123_56, 3), 0.124);
        assert_eq!(round_to(21.449, 1), 21.4);
        assert_eq!(round_to(-0.25, 1), -0.3);
    }
}

// ── Scorer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scorer {
    use tg_core::{DayType, NodeId, Scenario, SimRng, Weather};
    use tg_network::{GraphBuilder, NodeWeights};

    use super::helpers::{synthesized, tiny_graph};
    use crate::features::{area_feature, round_to, sigmoid, time_feature};
    use crate::{CongestionScorer, ModelError};

    fn weekday_8am() -> Scenario {
        Scenario::new(8, Weather::Sunny, DayType::Weekday).unwrap()
    }

    #[test]
    fn empty_graph_is_not_ready() {
        let g = GraphBuilder::new().build().unwrap();
        let result = CongestionScorer::new().predict(&g, &weekday_8am(), &mut SimRng::new(1));
        assert!(matches!(result, Err(ModelError::EmptyGraph)));
    }

    #[test]
    fn neighbor_influence_is_inverse_distance_mean() {
        let g = tiny_graph(None);
        let s = weekday_8am();
        let scorer = CongestionScorer::new();
        let t = time_feature(8, DayType::Weekday, g.profile_seed());

        // Neighbours of 0: mixed at 1 km, junction at 2 km.
        let expected = ((t + 1.0) / 2.0 / 1.0 + (t + 1.1) / 2.0 / 2.0) / 2.0;
        let got = scorer.neighbor_influence(&g, &s, NodeId(0), t);
        assert!((got - expected).abs() < 1e-12, "{got} vs {expected}");

        let rainy = Scenario::new(8, Weather::Rainy, DayType::Weekday).unwrap();
        let wet = scorer.neighbor_influence(&g, &rainy, NodeId(0), t);
        assert!((wet - expected * 1.2).abs() < 1e-12);

        // Node 1's only neighbour is the tech hub, in its 08–19 window.
        let one = scorer.neighbor_influence(&g, &s, NodeId(1), t);
        assert!((one - (t + area_feature(tg_core::AreaCategory::TechHub, 8)) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_node_has_no_neighbor_influence() {
        let g = tiny_graph(None);
        let b = CongestionScorer::new().explain(&g, &weekday_8am(), NodeId(3)).unwrap();
        assert_eq!(b.neighbor_influence, 0.0);
        assert_eq!(b.raw_score, 0.0);
        assert_eq!(b.base_level, 0.5);
    }

    #[test]
    fn rush_hour_area_features_via_explain() {
        let g = tiny_graph(None);
        let scorer = CongestionScorer::new();
        let s = weekday_8am();
        assert_eq!(scorer.explain(&g, &s, NodeId(0)).unwrap().area, 1.3); // tech hub
        assert_eq!(scorer.explain(&g, &s, NodeId(3)).unwrap().area, 1.1); // residential
    }

    #[test]
    fn raw_score_uses_node_weights() {
        let w = [
            NodeWeights([0.5, -0.25, 1.0, -1.0]),
            NodeWeights::ZERO,
            NodeWeights::ZERO,
            NodeWeights([1.0, 1.0, 1.0, 1.0]),
        ];
        let g = tiny_graph(Some(w));
        let s = Scenario::new(8, Weather::Rainy, DayType::Weekday).unwrap();
        let scorer = CongestionScorer::new();

        let b = scorer.explain(&g, &s, NodeId(0)).unwrap();
        let expected = 0.5 * b.time - 0.25 * 1.3 + 1.0 * 1.3 - 1.0 * 1.2 + 0.3 * b.neighbor_influence;
        assert!((b.raw_score - expected).abs() < 1e-12);
        assert!((b.base_level - sigmoid(expected).clamp(0.1, 1.0)).abs() < 1e-12);

        // Residential, local road, no neighbours.
        let r = scorer.explain(&g, &s, NodeId(3)).unwrap();
        assert!((r.raw_score - (r.time + 1.3 + 1.1 + 0.8)).abs() < 1e-12);
    }

    #[test]
    fn predicts_every_node_within_bounds() {
        let g = synthesized(3);
        let scorer = CongestionScorer::new();
        let map = scorer.predict(&g, &weekday_8am(), &mut SimRng::new(4)).unwrap();
        assert_eq!(map.len(), g.node_count());
        for node in g.nodes() {
            let p = map[&node.id];
            assert!((0.05..=0.95).contains(&p.congestion_level));
            assert_eq!(p.predicted_speed, round_to(40.0 * (1.0 - p.congestion_level), 1));
            assert_eq!(p.wait_time, round_to(p.congestion_level * 180.0, 1));
            assert!((50..300).contains(&p.volume));
        }
    }

    #[test]
    fn same_seed_same_predictions() {
        let g = synthesized(5);
        let scorer = CongestionScorer::new();
        let s = weekday_8am();
        let a = scorer.predict(&g, &s, &mut SimRng::new(9)).unwrap();
        let b = scorer.predict(&g, &s, &mut SimRng::new(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_calls_differ_only_by_noise() {
        let g = synthesized(6);
        let scorer = CongestionScorer::new();
        let s = Scenario::new(18, Weather::Rainy, DayType::Weekday).unwrap();
        let mut rng = SimRng::new(10);
        let a = scorer.predict(&g, &s, &mut rng).unwrap();
        let b = scorer.predict(&g, &s, &mut rng).unwrap();
        assert_ne!(a, b, "noise should change something");
        for node in g.nodes() {
            let base = scorer.explain(&g, &s, node.id).unwrap().base_level.clamp(0.05, 0.95);
            let (ca, cb) = (a[&node.id].congestion_level, b[&node.id].congestion_level);
            assert!((ca - cb).abs() <= 0.1 + 1e-3);
            assert!((ca - base).abs() <= 0.05 + 1e-3);
            assert!((cb - base).abs() <= 0.05 + 1e-3);
        }
    }

    #[test]
    fn single_node_matches_full_map() {
        let g = synthesized(7);
        let scorer = CongestionScorer::new();
        let s = weekday_8am();
        let call_seed: u64 = SimRng::new(12).random();
        let map = scorer.predict(&g, &s, &mut SimRng::new(12)).unwrap();
        for node in g.nodes().iter().take(10) {
            let p = scorer.predict_node(&g, &s, node.id, call_seed).unwrap();
            assert_eq!(p, map[&node.id]);
        }
    }

    #[test]
    fn unknown_node_errors() {
        let g = tiny_graph(None);
        let scorer = CongestionScorer::new();
        assert!(matches!(
            scorer.predict_node(&g, &weekday_8am(), NodeId(40), 0),
            Err(ModelError::NodeNotFound(NodeId(40)))
        ));
        assert!(scorer.explain(&g, &weekday_8am(), NodeId(40)).is_err());
    }

    #[test]
    fn rain_does_not_lower_weather_contribution() {
        let g = tiny_graph(None);
        let scorer = CongestionScorer::new();
        let sunny = scorer.explain(&g, &weekday_8am(), NodeId(0)).unwrap();
        let rainy = scorer
            .explain(&g, &Scenario::new(8, Weather::Rainy, DayType::Weekday).unwrap(), NodeId(0))
            .unwrap();
        assert!(rainy.weather >= sunny.weather);
        assert!(rainy.neighbor_influence >= sunny.neighbor_influence);
        assert_eq!(rainy.time, sunny.time);
    }
}

// ── Sample generation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod samples {
    use tg_core::{SimRng, Weather};
    use tg_network::GraphBuilder;

    use super::helpers::synthesized;
    use crate::features::round_to;
    use crate::samples::initial_capacity;
    use crate::{CongestionScorer, ModelError};

    #[test]
    fn reservation_is_capped_for_huge_requests() {
        assert_eq!(initial_capacity(10), 10);
        assert_eq!(initial_capacity(usize::MAX), 4096);

        let g = synthesized(4);
        let rows = CongestionScorer::new()
            .generate_samples(&g, 5000, &mut SimRng::new(5))
            .unwrap();
        assert_eq!(rows.len(), 5000);
    }

    #[test]
    fn thousand_rows_reference_real_nodes() {
        let g = synthesized(1);
        let rows = CongestionScorer::new()
            .generate_samples(&g, 1000, &mut SimRng::new(2))
            .unwrap();
        assert_eq!(rows.len(), 1000);
        for row in &rows {
            let node = g.node(row.intersection_id).expect("row references a graph node");
            assert_eq!(row.intersection_name, node.name);
            assert_eq!((row.lat, row.lng), (node.pos.lat, node.pos.lng));
            assert_eq!(row.road_type, node.road);
            assert_eq!(row.area_type, node.area);
            assert!(row.time_of_day < 24);
            assert!((0.05..=0.95).contains(&row.congestion_level));
            assert_eq!(row.predicted_speed, round_to(40.0 * (1.0 - row.congestion_level), 1));
            assert_eq!(row.wait_time, round_to(row.congestion_level * 180.0, 1));
        }
    }

    #[test]
    fn timestamps_carry_the_hour() {
        let g = synthesized(1);
        let rows = CongestionScorer::new()
            .generate_samples(&g, 200, &mut SimRng::new(3))
            .unwrap();
        for row in rows {
            assert_eq!(row.timestamp.len(), "2024-01-01 00:00:00".len());
            assert!(row.timestamp.starts_with("2024-01-"));
            let day: u8 = row.timestamp[8..10].parse().unwrap();
            assert!((1..=30).contains(&day));
            assert!(row.timestamp.ends_with(&format!(" {:02}:00:00", row.time_of_day)));
        }
    }

    #[test]
    fn scenario_mix_roughly_matches_probabilities() {
        let g = synthesized(1);
        let rows = CongestionScorer::new()
            .generate_samples(&g, 2000, &mut SimRng::new(4))
            .unwrap();
        let rainy = rows.iter().filter(|r| r.weather == Weather::Rainy).count() as f64 / 2000.0;
        let weekend = rows
            .iter()
            .filter(|r| r.day_type == tg_core::DayType::Weekend)
            .count() as f64
            / 2000.0;
        assert!((rainy - 0.3).abs() < 0.05, "rainy share {rainy}");
        assert!((weekend - 0.3).abs() < 0.05, "weekend share {weekend}");
        let hours: std::collections::HashSet<u8> = rows.iter().map(|r| r.time_of_day).collect();
        assert_eq!(hours.len(), 24);
    }

    #[test]
    fn reproducible_with_seed() {
        let g = synthesized(8);
        let scorer = CongestionScorer::new();
        let a = scorer.generate_samples(&g, 50, &mut SimRng::new(5)).unwrap();
        let b = scorer.generate_samples(&g, 50, &mut SimRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_rows_is_rejected() {
        let g = synthesized(1);
        let result = CongestionScorer::new().generate_samples(&g, 0, &mut SimRng::new(1));
        assert!(matches!(result, Err(ModelError::InvalidSampleCount(0))));
    }

    #[test]
    fn empty_graph_is_not_ready() {
        let g = GraphBuilder::new().build().unwrap();
        let result = CongestionScorer::new().generate_samples(&g, 5, &mut SimRng::new(1));
        assert!(matches!(result, Err(ModelError::EmptyGraph)));
    }
}

// ── Metadata ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod info {
    use crate::MODEL_INFO;

    #[test]
    fn static_metadata() {
        assert_eq!(MODEL_INFO.algorithm, "Graph Convolutional Network (GCN)");
        assert_eq!(MODEL_INFO.features, ["time_of_day", "weather", "area_type", "road_type"]);
        assert_eq!(MODEL_INFO.accuracy, 0.87);
        assert_eq!(MODEL_INFO.last_trained, "2024-01-15");
    }
}

// ── Prediction invariants over many graphs and scenarios ──────────────────────

#[cfg(test)]
mod invariants {
    use proptest::prelude::*;

    use tg_core::{DayType, Scenario, SimRng, Weather};

    use super::helpers::synthesized;
    use crate::CongestionScorer;
    use crate::features::round_to;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn predictions_respect_bounds_and_derivations(
            graph_seed in any::<u64>(),
            call_seed in any::<u64>(),
            hour in 0i64..24,
            rainy in any::<bool>(),
            weekend in any::<bool>(),
        ) {
            let g = synthesized(graph_seed);
            let weather = if rainy { Weather::Rainy } else { Weather::Sunny };
            let day = if weekend { DayType::Weekend } else { DayType::Weekday };
            let s = Scenario::new(hour, weather, day).unwrap();
            let map = CongestionScorer::new()
                .predict(&g, &s, &mut SimRng::new(call_seed))
                .unwrap();

            prop_assert_eq!(map.len(), g.node_count());
            for p in map.values() {
                prop_assert!(p.congestion_level >= 0.05 && p.congestion_level <= 0.95);
                prop_assert_eq!(p.predicted_speed, round_to(40.0 * (1.0 - p.congestion_level), 1));
                prop_assert_eq!(p.wait_time, round_to(p.congestion_level * 180.0, 1));
                prop_assert!(p.volume >= 50 && p.volume < 300);
            }
        }
    }
}
