//! Plain data row types written by output backends.
//!
//! Sample rows are written as [`tg_model::SampleRow`] directly.

use tg_core::{DayType, NodeId, Scenario, Weather};
use tg_model::{Prediction, PredictionMap};

/// One node's prediction under one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRow {
    pub hour:       u8,
    pub weather:    Weather,
    pub day_type:   DayType,
    pub node:       NodeId,
    pub prediction: Prediction,
}

impl PredictionRow {
    /// Flatten a prediction map into rows, ascending by node.
    pub fn from_map(scenario: &Scenario, map: &PredictionMap) -> Vec<PredictionRow> {
        map.iter()
            .map(|(&node, &prediction)| PredictionRow {
                hour: scenario.hour(),
                weather: scenario.weather(),
                day_type: scenario.day_type(),
                node,
                prediction,
            })
            .collect()
    }
}
