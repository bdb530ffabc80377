//! Scenario inputs for a prediction query.
//!
//! A [`Scenario`] is the `(hour, weather, day type)` triple.  It is validated
//! once at construction; every downstream function can assume the hour is in
//! `0..=23`.

use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Weather ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
}

impl Weather {
    #[inline]
    pub fn is_rainy(self) -> bool {
        matches!(self, Weather::Rainy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Rainy => "rainy",
        }
    }
}

impl FromStr for Weather {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(Weather::Sunny),
            "rainy" => Ok(Weather::Rainy),
            other   => Err(CoreError::UnknownWeather(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DayType ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }
}

impl FromStr for DayType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekday" => Ok(DayType::Weekday),
            "weekend" => Ok(DayType::Weekend),
            other     => Err(CoreError::UnknownDayType(other.to_owned())),
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A validated prediction scenario.
///
/// Fields are private so an out-of-range hour can never be constructed;
/// use [`Scenario::new`] or [`Scenario::parse`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    hour:     u8,
    weather:  Weather,
    day_type: DayType,
}

impl Scenario {
    pub const HOURS_PER_DAY: u8 = 24;

    /// Validate `hour` and build a scenario.  Hours outside `0..=23` are
    /// rejected, never clamped.
    pub fn new(hour: i64, weather: Weather, day_type: DayType) -> CoreResult<Self> {
        if !(0..Self::HOURS_PER_DAY as i64).contains(&hour) {
            return Err(CoreError::InvalidHour(hour));
        }
        Ok(Self { hour: hour as u8, weather, day_type })
    }

    /// Build from raw request tokens (`"sunny"`, `"weekday"`, …).
    pub fn parse(hour: i64, weather: &str, day_type: &str) -> CoreResult<Self> {
        let weather = weather.parse()?;
        let day_type = day_type.parse()?;
        Self::new(hour, weather, day_type)
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub fn weather(&self) -> Weather {
        self.weather
    }

    #[inline]
    pub fn day_type(&self) -> DayType {
        self.day_type
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00 {} {}", self.hour, self.weather, self.day_type)
    }
}
