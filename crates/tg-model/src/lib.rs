//! `tg-model` — per-intersection congestion forecasts.
//!
//! The "graph neural network" is a fixed-shape scoring function: four
//! per-node features weighted by the node's coefficients, plus one level of
//! inverse-distance neighbour aggregation, squashed through a sigmoid and
//! jittered by a small noise term.  Nothing is learned; the coefficients are
//! drawn once when the graph is synthesized.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`features`] | pure feature functions, sigmoid, rounding                  |
//! | [`scorer`]   | `CongestionScorer`, `Prediction`, `FeatureBreakdown`       |
//! | [`samples`]  | `SampleRow`, labeled sample generation                     |
//! | [`info`]     | `ModelInfo`, the static `MODEL_INFO` metadata              |
//! | [`error`]    | `ModelError`, `ModelResult<T>`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores nodes on Rayon's thread pool.                   |
//! | `serde`    | Derives `Serialize` on predictions, samples, metadata. |

pub mod error;
pub mod features;
pub mod info;
pub mod samples;
pub mod scorer;

#[cfg(test)]
mod tests;

pub use error::{ModelError, ModelResult};
pub use info::{MODEL_INFO, ModelInfo};
pub use samples::SampleRow;
pub use scorer::{CongestionScorer, FeatureBreakdown, Prediction, PredictionMap};
