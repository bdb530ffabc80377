//! Fixed geographic area anchors.
//!
//! Every synthesized intersection clusters around one of these.  The table is
//! static configuration: fifteen named areas of Bangalore, each tagged with
//! the land-use category that drives its road mix and its hourly area factor.

use tg_core::{AreaCategory, GeoPoint};
use tg_core::AreaCategory::{Commercial, Junction, Mixed, Residential, TechHub};

/// A named area around which intersections are generated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AreaAnchor {
    pub name: &'static str,
    pub pos:  GeoPoint,
    pub area: AreaCategory,
}

impl AreaAnchor {
    pub const fn new(name: &'static str, lat: f64, lng: f64, area: AreaCategory) -> Self {
        Self { name, pos: GeoPoint::new(lat, lng), area }
    }

    /// Weights for `[highway, arterial, local]` when drawing the road
    /// category of an intersection in this area.
    pub fn road_mix(&self) -> [f64; 3] {
        road_mix(self.area)
    }
}

/// Road-category weights by area: residential areas lean local, everything
/// else leans towards highways and arterials.
pub fn road_mix(area: AreaCategory) -> [f64; 3] {
    match area {
        AreaCategory::Residential => [0.2, 0.3, 0.5],
        _                         => [0.4, 0.4, 0.2],
    }
}

/// The fifteen anchors, in generation order.
pub const ANCHORS: [AreaAnchor; 15] = [
    AreaAnchor::new("MG Road",         12.9716, 77.5946, Commercial),
    AreaAnchor::new("Brigade Road",    12.9698, 77.6103, Commercial),
    AreaAnchor::new("Whitefield",      12.9698, 77.7500, TechHub),
    AreaAnchor::new("Electronic City", 12.8456, 77.6603, TechHub),
    AreaAnchor::new("Koramangala",     12.9352, 77.6245, Residential),
    AreaAnchor::new("Indiranagar",     12.9719, 77.6412, Mixed),
    AreaAnchor::new("Jayanagar",       12.9279, 77.5830, Residential),
    AreaAnchor::new("Banashankari",    12.9081, 77.5574, Residential),
    AreaAnchor::new("Marathahalli",    12.9591, 77.6974, TechHub),
    AreaAnchor::new("HSR Layout",      12.9082, 77.6476, Residential),
    AreaAnchor::new("Hebbal",          13.0358, 77.5970, Junction),
    AreaAnchor::new("Silk Board",      12.9177, 77.6238, Junction),
    AreaAnchor::new("KR Puram",        13.0076, 77.6955, Junction),
    AreaAnchor::new("Yeshwanthpur",    13.0280, 77.5409, Mixed),
    AreaAnchor::new("Malleshwaram",    13.0031, 77.5643, Residential),
];
