//! Area and road category enums shared by the synthesizer and the scorer.
//!
//! Both enums carry an `Unknown` arm.  Synthesized graphs never produce it,
//! but unrecognized labels deserialized from outside fall back to it
//! (`#[serde(other)]`), and the scorer maps it to a neutral factor.
//! `FromStr` stays strict.

use std::str::FromStr;

use crate::CoreError;

// ── AreaCategory ──────────────────────────────────────────────────────────────

/// Land-use category of the area an intersection belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaCategory {
    Commercial,
    TechHub,
    Residential,
    Mixed,
    Junction,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl AreaCategory {
    /// The five categories an anchor can carry.
    pub const KNOWN: [AreaCategory; 5] = [
        AreaCategory::Commercial,
        AreaCategory::TechHub,
        AreaCategory::Residential,
        AreaCategory::Mixed,
        AreaCategory::Junction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AreaCategory::Commercial  => "commercial",
            AreaCategory::TechHub     => "tech_hub",
            AreaCategory::Residential => "residential",
            AreaCategory::Mixed       => "mixed",
            AreaCategory::Junction    => "junction",
            AreaCategory::Unknown     => "unknown",
        }
    }
}

impl FromStr for AreaCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commercial"  => Ok(AreaCategory::Commercial),
            "tech_hub"    => Ok(AreaCategory::TechHub),
            "residential" => Ok(AreaCategory::Residential),
            "mixed"       => Ok(AreaCategory::Mixed),
            "junction"    => Ok(AreaCategory::Junction),
            other         => Err(CoreError::UnknownCategory(other.to_owned())),
        }
    }
}

impl std::fmt::Display for AreaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RoadCategory ──────────────────────────────────────────────────────────────

/// Functional class of a road or of the dominant road at an intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadCategory {
    Highway,
    Arterial,
    Local,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl RoadCategory {
    /// Draw order used by weighted and uniform category choices.
    pub const KNOWN: [RoadCategory; 3] =
        [RoadCategory::Highway, RoadCategory::Arterial, RoadCategory::Local];

    pub fn as_str(self) -> &'static str {
        match self {
            RoadCategory::Highway  => "highway",
            RoadCategory::Arterial => "arterial",
            RoadCategory::Local    => "local",
            RoadCategory::Unknown  => "unknown",
        }
    }
}

impl FromStr for RoadCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highway"  => Ok(RoadCategory::Highway),
            "arterial" => Ok(RoadCategory::Arterial),
            "local"    => Ok(RoadCategory::Local),
            other      => Err(CoreError::UnknownCategory(other.to_owned())),
        }
    }
}

impl std::fmt::Display for RoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
