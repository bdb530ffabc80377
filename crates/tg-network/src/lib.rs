//! `tg-network` — synthetic city road network.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`anchor`] | `AreaAnchor`, the fixed `ANCHORS` table, road-category mixes  |
//! | [`index`]  | `SpatialIndex` (R-tree over node positions)                   |
//! | [`graph`]  | `RoadGraph`, `Node`, `Edge`, `NodeWeights`, `GraphBuilder`    |
//! | [`synth`]  | `NetworkSynthesizer`                                          |
//! | [`error`]  | `NetworkError`, `NetworkResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize` on nodes, edges and anchors.             |

pub mod anchor;
pub mod error;
pub mod graph;
pub mod index;
pub mod synth;


pub use anchor::{ANCHORS, AreaAnchor};
pub use error::{NetworkError, NetworkResult};
pub use graph::{Edge, GraphBuilder, Node, NodeAttrs, NodeWeights, RoadGraph};
pub use index::SpatialIndex;
pub use synth::NetworkSynthesizer;
