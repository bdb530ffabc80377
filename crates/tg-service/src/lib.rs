//! `tg-service` — the query surface over a synthesized graph.
//!
//! A [`TrafficService`] owns the current graph through a [`GraphHandle`] and
//! exposes the three operations a transport layer needs:
//!
//! | Operation                               | Returns           |
//! |-----------------------------------------|-------------------|
//! | [`get_graph`](TrafficService::get_graph)               | [`GraphView`]     |
//! | [`predict`](TrafficService::predict)                   | [`PredictResponse`] |
//! | [`generate_samples`](TrafficService::generate_samples) | `Vec<SampleRow>`  |
//!
//! All views are `Serialize`; the service itself knows nothing about HTTP,
//! CSV or any other wire format.
//!
//! # Graph replacement
//!
//! The graph is never mutated.  [`TrafficService::regenerate`] synthesizes a
//! complete new graph off to the side and swaps the `Arc` in one step; a
//! query that already cloned the old `Arc` finishes against the old graph.

pub mod error;
pub mod handle;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use error::{ServiceError, ServiceResult};
pub use handle::GraphHandle;
pub use service::TrafficService;
pub use view::{EdgeView, GraphView, NodeFeatures, NodeView, PredictResponse, SamplesView};

pub use tg_model::{MODEL_INFO, ModelInfo, Prediction, PredictionMap, SampleRow};
