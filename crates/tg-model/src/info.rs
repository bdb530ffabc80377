//! Static model metadata returned alongside every prediction.

/// Descriptive metadata.  None of these values are computed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelInfo {
    pub algorithm:    &'static str,
    pub features:     &'static [&'static str],
    pub accuracy:     f64,
    pub last_trained: &'static str,
}

pub const MODEL_INFO: ModelInfo = ModelInfo {
    algorithm:    "Graph Convolutional Network (GCN)",
    features:     &["time_of_day", "weather", "area_type", "road_type"],
    accuracy:     0.87,
    last_trained: "2024-01-15",
};
