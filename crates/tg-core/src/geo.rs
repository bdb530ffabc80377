//! Geographic coordinate type.
//!
//! Unlike a routing engine, the synthesizer never needs great-circle
//! accuracy: intersections sit within a few hundredths of a degree of each
//! other, so distances are planar in degree space and scaled to kilometres.

/// Kilometres per degree used by the planar approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Euclidean distance in degree space, unscaled.
    #[inline]
    pub fn planar_deg(self, other: GeoPoint) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }

    /// Planar distance scaled by `km_per_degree`.
    #[inline]
    pub fn planar_km(self, other: GeoPoint, km_per_degree: f64) -> f64 {
        self.planar_deg(other) * km_per_degree
    }

    /// Offset by `(d_lat, d_lng)` degrees.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lng: f64) -> GeoPoint {
        GeoPoint::new(self.lat + d_lat, self.lng + d_lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
