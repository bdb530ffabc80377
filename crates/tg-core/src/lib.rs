//! `tg-core` — foundational types for the traffic-graph workspace.
//!
//! This crate is a dependency of every other `tg-*` crate.  It has no `tg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                      |
//! | [`geo`]      | `GeoPoint`, planar degree-scaled distance               |
//! | [`category`] | `AreaCategory`, `RoadCategory`                          |
//! | [`scenario`] | `Scenario`, `Weather`, `DayType`                        |
//! | [`rng`]      | `SimRng` (root), `NodeRng` (per-node, per-call)         |
//! | [`config`]   | `SynthesisConfig`                                       |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds serde derives to the public data types.               |

pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod scenario;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::{AreaCategory, RoadCategory};
pub use config::SynthesisConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use rng::{NodeRng, SimRng};
pub use scenario::{DayType, Scenario, Weather};
