use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::DrawStrategy;
use super::rules::RuleSet;

/// Identifier wrapper for residents entered into the lottery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentId(pub String);

impl fmt::Display for ResidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResidentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResidentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier wrapper for parking spaces (the painted space number, e.g. `17A`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(pub String);

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Raised when an area, size, or zone label cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} label '{value}'")]
pub struct LabelError {
    pub kind: &'static str,
    pub value: String,
}

impl LabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Building area a household lives in. `S` marks the ground-floor store-keeper units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AreaCode {
    S,
    A,
    B,
    C,
}

impl AreaCode {
    pub const fn label(self) -> &'static str {
        match self {
            AreaCode::S => "S",
            AreaCode::A => "A",
            AreaCode::B => "B",
            AreaCode::C => "C",
        }
    }

    /// Allocation zone matched against this area when area restriction is active.
    ///
    /// Store-keepers are matched to the store frontage rather than to a zone named `S`.
    pub const fn home_zone(self) -> AllocationZone {
        match self {
            AreaCode::S => AllocationZone::Store,
            AreaCode::A => AllocationZone::A,
            AreaCode::B => AllocationZone::B,
            AreaCode::C => AllocationZone::C,
        }
    }
}

impl FromStr for AreaCode {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(AreaCode::S),
            "A" => Ok(AreaCode::A),
            "B" => Ok(AreaCode::B),
            "C" => Ok(AreaCode::C),
            _ => Err(LabelError::new("area", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceSize {
    Large,
    Small,
    Accessible,
    /// No size painted on the bay.
    Unmarked,
}

impl SpaceSize {
    pub const fn label(self) -> &'static str {
        match self {
            SpaceSize::Large => "large",
            SpaceSize::Small => "small",
            SpaceSize::Accessible => "accessible",
            SpaceSize::Unmarked => "unmarked",
        }
    }
}

impl FromStr for SpaceSize {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "large" | "大" => Ok(SpaceSize::Large),
            "small" | "小" => Ok(SpaceSize::Small),
            "accessible" | "disabled" | "身障" => Ok(SpaceSize::Accessible),
            "" | "unmarked" => Ok(SpaceSize::Unmarked),
            _ => Err(LabelError::new("size", value)),
        }
    }
}

/// Zone a space was allocated to when the car park was laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationZone {
    Motorcycle,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    Store,
    Reserved,
}

impl AllocationZone {
    pub const fn label(self) -> &'static str {
        match self {
            AllocationZone::Motorcycle => "motorcycle",
            AllocationZone::A => "A",
            AllocationZone::B => "B",
            AllocationZone::C => "C",
            AllocationZone::Store => "store",
            AllocationZone::Reserved => "reserved",
        }
    }
}

impl FromStr for AllocationZone {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "motorcycle" | "moto" | "重" => Ok(AllocationZone::Motorcycle),
            "a" => Ok(AllocationZone::A),
            "b" => Ok(AllocationZone::B),
            "c" => Ok(AllocationZone::C),
            "store" | "店" => Ok(AllocationZone::Store),
            "reserved" | "保留" => Ok(AllocationZone::Reserved),
            _ => Err(LabelError::new("zone", trimmed)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub label: String,
    pub area: AreaCode,
}

impl Resident {
    /// Resident whose display label is the unit number used as its identifier.
    pub fn new(id: impl Into<String>, area: AreaCode) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id: ResidentId(id),
            area,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpace {
    pub id: SpaceId,
    pub size: SpaceSize,
    pub zone: AllocationZone,
    pub available: bool,
}

impl ParkingSpace {
    pub fn new(id: impl Into<String>, size: SpaceSize, zone: AllocationZone) -> Self {
        Self {
            id: SpaceId(id.into()),
            size,
            zone,
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// A single winning pairing. The space is recorded as it stood once won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub resident: Resident,
    pub space: ParkingSpace,
}

/// A committed lottery round. Failed draws never produce one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryRound {
    pub round: u32,
    pub winners: Vec<Assignment>,
    pub rules: RuleSet,
    pub strategy: DrawStrategy,
    pub unknown_residents: Vec<ResidentId>,
    pub drawn_at: DateTime<Utc>,
}

impl LotteryRound {
    pub fn space_for(&self, resident: &ResidentId) -> Option<&ParkingSpace> {
        self.winners
            .iter()
            .find(|assignment| &assignment.resident.id == resident)
            .map(|assignment| &assignment.space)
    }
}
