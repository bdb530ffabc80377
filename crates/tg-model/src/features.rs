//! Pure feature functions of the congestion model.
//!
//! Only [`time_feature`] involves randomness: it is uniform within the band
//! selected by `(hour, day type)`, drawn from a generator keyed by the
//! graph's profile seed and the scenario.  For a given graph the same
//! scenario therefore always sees the same time feature.

use std::ops::Range;

use tg_core::{AreaCategory, DayType, RoadCategory, SimRng, Weather};

/// Multiplier on a neighbour's base congestion when it rains.
pub const RAIN_NEIGHBOR_FACTOR: f64 = 1.2;

// ── Time of day ───────────────────────────────────────────────────────────────

/// Half-open band the time feature is drawn from.
pub fn time_band(hour: u8, day_type: DayType) -> Range<f64> {
    match day_type {
        DayType::Weekday => match hour {
            7..=10 | 17..=20 => 0.8..1.0,
            11..=16          => 0.4..0.6,
            _                => 0.1..0.3,
        },
        DayType::Weekend => match hour {
            10..=14 => 0.5..0.7,
            _       => 0.2..0.4,
        },
    }
}

/// Stable key of an `(hour, day type)` pair for [`SimRng::keyed`].
fn profile_key(hour: u8, day_type: DayType) -> u64 {
    let day = match day_type {
        DayType::Weekday => 0,
        DayType::Weekend => 1,
    };
    day * 24 + hour as u64
}

/// The time feature of `(hour, day_type)` under `profile_seed`.
pub fn time_feature(hour: u8, day_type: DayType, profile_seed: u64) -> f64 {
    let mut rng = SimRng::keyed(profile_seed, profile_key(hour, day_type));
    rng.gen_range(time_band(hour, day_type))
}

// ── Static factors ────────────────────────────────────────────────────────────

pub fn weather_feature(weather: Weather) -> f64 {
    match weather {
        Weather::Rainy => 1.3,
        Weather::Sunny => 1.0,
    }
}

/// Hour-dependent area factor.  Inclusive windows; unknown areas are neutral.
pub fn area_feature(area: AreaCategory, hour: u8) -> f64 {
    match area {
        AreaCategory::Commercial  => if (9..=21).contains(&hour) { 1.2 } else { 0.8 },
        AreaCategory::TechHub     => if (8..=19).contains(&hour) { 1.3 } else { 0.7 },
        AreaCategory::Residential => {
            if (6..=9).contains(&hour) || (18..=22).contains(&hour) { 1.1 } else { 0.9 }
        }
        AreaCategory::Mixed       => 1.0,
        AreaCategory::Junction    => 1.1,
        AreaCategory::Unknown     => 1.0,
    }
}

pub fn road_feature(road: RoadCategory) -> f64 {
    match road {
        RoadCategory::Highway  => 1.2,
        RoadCategory::Arterial => 1.0,
        RoadCategory::Local    => 0.8,
        RoadCategory::Unknown  => 1.0,
    }
}

// ── Numeric helpers ───────────────────────────────────────────────────────────

#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}
