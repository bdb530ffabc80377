//! Labeled sample generation for tabular export.
//!
//! Each row draws its own scenario and intersection; rows share nothing but
//! the graph and the caller's RNG stream.

use tracing::debug;

use tg_core::{AreaCategory, DayType, NodeId, RoadCategory, Scenario, SimRng, Weather};
use tg_network::RoadGraph;

use crate::{CongestionScorer, ModelError, ModelResult, Prediction};

/// Probability that a sampled scenario is rainy.
const RAIN_PROBABILITY: f64 = 0.3;
/// Probability that a sampled scenario falls on a weekend.
const WEEKEND_PROBABILITY: f64 = 0.3;
/// Most rows reserved up front; larger requests grow as rows are produced.
const RESERVE_ROWS: usize = 4096;

/// Initial capacity for a request of `count` rows.
pub(crate) fn initial_capacity(count: usize) -> usize {
    count.min(RESERVE_ROWS)
}

/// One labeled training row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleRow {
    /// `2024-01-DD HH:00:00`, day uniform in 1..=30.
    pub timestamp:         String,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_node_key"))]
    pub intersection_id:   NodeId,
    pub intersection_name: String,
    pub lat:               f64,
    pub lng:               f64,
    pub road_type:         RoadCategory,
    pub area_type:         AreaCategory,
    pub time_of_day:       u8,
    pub weather:           Weather,
    pub day_type:          DayType,
    pub congestion_level:  f64,
    pub predicted_speed:   f64,
    pub volume:            u32,
    pub wait_time:         f64,
}

#[cfg(feature = "serde")]
fn serialize_node_key<S: serde::Serializer>(id: &NodeId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&id.key())
}

impl CongestionScorer {
    /// Draw `count` independent labeled rows.
    ///
    /// Per row: hour uniform in `0..24`, rainy with probability 0.3, weekend
    /// with probability 0.3, a uniformly chosen intersection, and that
    /// intersection's prediction under a fresh call seed.
    pub fn generate_samples(
        &self,
        graph: &RoadGraph,
        count: usize,
        rng:   &mut SimRng,
    ) -> ModelResult<Vec<SampleRow>> {
        if count == 0 {
            return Err(ModelError::InvalidSampleCount(count));
        }
        if graph.is_empty() {
            return Err(ModelError::EmptyGraph);
        }

        let mut rows = Vec::with_capacity(initial_capacity(count));
        for _ in 0..count {
            let hour: i64 = rng.gen_range(0..Scenario::HOURS_PER_DAY as i64);
            let weather = if rng.gen_bool(RAIN_PROBABILITY) { Weather::Rainy } else { Weather::Sunny };
            let day_type =
                if rng.gen_bool(WEEKEND_PROBABILITY) { DayType::Weekend } else { DayType::Weekday };
            let scenario = Scenario::new(hour, weather, day_type)?;

            let node = rng.choose(graph.nodes()).ok_or(ModelError::EmptyGraph)?;
            let call_seed: u64 = rng.random();
            let Prediction { congestion_level, predicted_speed, volume, wait_time } =
                self.predict_node(graph, &scenario, node.id, call_seed)?;
            let day: u8 = rng.gen_range(1..=30);

            rows.push(SampleRow {
                timestamp:         format!("2024-01-{day:02} {:02}:00:00", scenario.hour()),
                intersection_id:   node.id,
                intersection_name: node.name.clone(),
                lat:               node.pos.lat,
                lng:               node.pos.lng,
                road_type:         node.road,
                area_type:         node.area,
                time_of_day:       scenario.hour(),
                weather,
                day_type,
                congestion_level,
                predicted_speed,
                volume,
                wait_time,
            });
        }
        debug!(rows = rows.len(), "generated labeled samples");
        Ok(rows)
    }
}
