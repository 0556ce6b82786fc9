use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{AreaCode, Assignment, LotteryRound, ParkingSpace, Resident, ResidentId};
use super::rules::RuleToggle;
use super::session::{AreaCounts, LotterySession};

#[derive(Debug, Clone, Serialize)]
pub struct WinnerView {
    pub resident_id: String,
    pub resident_label: String,
    pub area: AreaCode,
    pub space_id: String,
    pub space_size: &'static str,
    pub space_zone: &'static str,
}

impl From<&Assignment> for WinnerView {
    fn from(assignment: &Assignment) -> Self {
        Self {
            resident_id: assignment.resident.id.0.clone(),
            resident_label: assignment.resident.label.clone(),
            area: assignment.resident.area,
            space_id: assignment.space.id.0.clone(),
            space_size: assignment.space.size.label(),
            space_zone: assignment.space.zone.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    pub round: u32,
    pub strategy: &'static str,
    pub rules: Vec<RuleToggle>,
    pub winners: Vec<WinnerView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_residents: Vec<ResidentId>,
    pub drawn_at: DateTime<Utc>,
}

impl From<&LotteryRound> for RoundView {
    fn from(round: &LotteryRound) -> Self {
        Self {
            round: round.round,
            strategy: round.strategy.label(),
            rules: round.rules.active(),
            winners: round.winners.iter().map(WinnerView::from).collect(),
            unknown_residents: round.unknown_residents.clone(),
            drawn_at: round.drawn_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpaceView {
    pub id: String,
    pub size: &'static str,
    pub zone: &'static str,
}

impl From<&ParkingSpace> for SpaceView {
    fn from(space: &ParkingSpace) -> Self {
        Self {
            id: space.id.0.clone(),
            size: space.size.label(),
            zone: space.zone.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResidentView {
    pub id: String,
    pub label: String,
    pub area: AreaCode,
}

impl From<&Resident> for ResidentView {
    fn from(resident: &Resident) -> Self {
        Self {
            id: resident.id.0.clone(),
            label: resident.label.clone(),
            area: resident.area,
        }
    }
}

/// Pool state as shown between rounds.
#[derive(Debug, Clone, Serialize)]
pub struct PoolView {
    pub rounds_drawn: usize,
    pub available_spaces: usize,
    pub unavailable_spaces: usize,
    pub available_residents: AreaCounts,
}

impl PoolView {
    pub fn from_session(session: &LotterySession) -> Self {
        let available_spaces = session.available_spaces().len();
        Self {
            rounds_drawn: session.history().len(),
            available_spaces,
            unavailable_spaces: session.spaces().len() - available_spaces,
            available_residents: session.area_counts(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResidentPoolView {
    pub counts: AreaCounts,
    pub residents: Vec<ResidentView>,
}

impl ResidentPoolView {
    pub fn from_session(session: &LotterySession) -> Self {
        Self {
            counts: session.area_counts(),
            residents: session
                .available_residents()
                .iter()
                .map(ResidentView::from)
                .collect(),
        }
    }
}
