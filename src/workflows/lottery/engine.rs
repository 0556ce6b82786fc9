use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{Assignment, LabelError, ParkingSpace, Resident, ResidentId, SpaceId};
use super::rules::{candidate_indices, eligible_spaces, EligibilityMode, RuleConfigError, RuleSet};

/// How winners are paired with spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStrategy {
    /// Residents are processed one by one with area and size narrowing, then a
    /// best-effort second pass places anyone left over.
    #[default]
    Matched,
    /// The eligible pool and the participants are shuffled and zipped together.
    Direct,
}

impl DrawStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            DrawStrategy::Matched => "matched",
            DrawStrategy::Direct => "direct",
        }
    }

    pub const fn eligibility_mode(self) -> EligibilityMode {
        match self {
            DrawStrategy::Matched => EligibilityMode::Matching,
            DrawStrategy::Direct => EligibilityMode::PoolFilter,
        }
    }
}

impl FromStr for DrawStrategy {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "matched" => Ok(DrawStrategy::Matched),
            "direct" => Ok(DrawStrategy::Direct),
            _ => Err(LabelError::new("strategy", value)),
        }
    }
}

/// What to do with explicitly listed residents who are not in the available pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownResidentPolicy {
    /// Drop them from the draw and report them on the round.
    #[default]
    Ignore,
    /// Fail the draw before anything is allocated.
    Reject,
}

impl FromStr for UnknownResidentPolicy {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(UnknownResidentPolicy::Ignore),
            "reject" => Ok(UnknownResidentPolicy::Reject),
            _ => Err(LabelError::new("unknown resident policy", value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participants {
    /// Draw this many residents at random from the available pool.
    Count(usize),
    /// Draw exactly these residents.
    Residents(Vec<ResidentId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub participants: Participants,
    pub rules: RuleSet,
    pub strategy: DrawStrategy,
}

impl DrawRequest {
    pub fn count(participants: usize, rules: RuleSet) -> Self {
        Self {
            participants: Participants::Count(participants),
            rules,
            strategy: DrawStrategy::default(),
        }
    }

    pub fn residents<I>(ids: I, rules: RuleSet) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ResidentId>,
    {
        Self {
            participants: Participants::Residents(ids.into_iter().map(Into::into).collect()),
            rules,
            strategy: DrawStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: DrawStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Result of a successful draw: the pairings plus the pools to carry into the next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub winners: Vec<Assignment>,
    pub spaces: Vec<ParkingSpace>,
    pub residents: Vec<Resident>,
    pub unknown_residents: Vec<ResidentId>,
}

/// Stateless allocator. Pools are borrowed, never mutated; a fresh snapshot is returned
/// only when the whole round succeeds.
///
/// Callers that share pools between threads must serialize draws themselves.
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    unknown_residents: UnknownResidentPolicy,
}

impl AllocationEngine {
    pub fn new(unknown_residents: UnknownResidentPolicy) -> Self {
        Self { unknown_residents }
    }

    pub fn draw<R>(
        &self,
        spaces: &[ParkingSpace],
        residents: &[Resident],
        request: &DrawRequest,
        rng: &mut R,
    ) -> Result<DrawOutcome, LotteryError>
    where
        R: Rng,
    {
        request.rules.validate()?;

        let mode = request.strategy.eligibility_mode();
        let mut working: Vec<ParkingSpace> = eligible_spaces(spaces, &request.rules, mode)
            .into_iter()
            .cloned()
            .collect();

        let (mut participants, unknown_residents) =
            self.resolve(&request.participants, residents, working.len(), rng)?;
        participants.shuffle(rng);

        let winners = match request.strategy {
            DrawStrategy::Matched => {
                match_participants(&participants, &mut working, &request.rules, rng)?
            }
            DrawStrategy::Direct => zip_participants(&participants, &mut working, rng),
        };

        Ok(commit(spaces, residents, winners, unknown_residents))
    }

    fn resolve<R>(
        &self,
        participants: &Participants,
        residents: &[Resident],
        eligible: usize,
        rng: &mut R,
    ) -> Result<(Vec<Resident>, Vec<ResidentId>), LotteryError>
    where
        R: Rng,
    {
        match participants {
            Participants::Count(0) => Err(LotteryError::EmptyDraw),
            Participants::Count(requested) => {
                let requested = *requested;
                ensure_capacity(Shortfall::Spaces, requested, eligible)?;
                ensure_capacity(Shortfall::Residents, requested, residents.len())?;

                let sample: Vec<Resident> = residents
                    .choose_multiple(rng, requested)
                    .cloned()
                    .collect();
                Ok((sample, Vec::new()))
            }
            Participants::Residents(ids) => {
                if ids.is_empty() {
                    return Err(LotteryError::EmptyDraw);
                }

                let by_id: HashMap<&ResidentId, &Resident> = residents
                    .iter()
                    .map(|resident| (&resident.id, resident))
                    .collect();
                let mut seen = HashSet::new();
                let mut resolved = Vec::with_capacity(ids.len());
                let mut unknown = Vec::new();

                for id in ids {
                    if !seen.insert(id) {
                        continue;
                    }
                    match by_id.get(id) {
                        Some(resident) => resolved.push((*resident).clone()),
                        None => unknown.push(id.clone()),
                    }
                }

                if !unknown.is_empty() {
                    warn!(
                        count = unknown.len(),
                        policy = ?self.unknown_residents,
                        "explicit draw lists residents outside the available pool"
                    );
                    if self.unknown_residents == UnknownResidentPolicy::Reject {
                        return Err(LotteryError::UnknownResidents(unknown));
                    }
                }

                if resolved.is_empty() {
                    return Err(LotteryError::EmptyDraw);
                }
                ensure_capacity(Shortfall::Spaces, resolved.len(), eligible)?;

                Ok((resolved, unknown))
            }
        }
    }
}

fn ensure_capacity(
    shortfall: Shortfall,
    requested: usize,
    available: usize,
) -> Result<(), CapacityError> {
    if requested > available {
        Err(CapacityError {
            shortfall,
            requested,
            available,
        })
    } else {
        Ok(())
    }
}

fn claim(resident: &Resident, working: &mut Vec<ParkingSpace>, index: usize) -> Assignment {
    let mut space = working.remove(index);
    space.available = false;
    Assignment {
        resident: resident.clone(),
        space,
    }
}

/// First pass with per-resident narrowing, then a best-effort pass over the deferred.
pub(crate) fn match_participants<R>(
    participants: &[Resident],
    working: &mut Vec<ParkingSpace>,
    rules: &RuleSet,
    rng: &mut R,
) -> Result<Vec<Assignment>, LotteryError>
where
    R: Rng,
{
    let mut winners = Vec::with_capacity(participants.len());
    let mut deferred = Vec::new();

    for resident in participants {
        let candidates = candidate_indices(resident, working, rules);
        match candidates.choose(rng) {
            Some(&index) => winners.push(claim(resident, working, index)),
            None => {
                debug!(resident = %resident.id, area = resident.area.label(), "deferring resident");
                deferred.push(resident);
            }
        }
    }

    for (position, resident) in deferred.iter().enumerate() {
        if working.is_empty() {
            return Err(LotteryError::Unsatisfiable {
                deferred: deferred.len() - position,
                placed: winners.len(),
            });
        }
        let index = rng.gen_range(0..working.len());
        winners.push(claim(resident, working, index));
    }

    Ok(winners)
}

fn zip_participants<R>(
    participants: &[Resident],
    working: &mut Vec<ParkingSpace>,
    rng: &mut R,
) -> Vec<Assignment>
where
    R: Rng,
{
    working.shuffle(rng);
    let mut winners = Vec::with_capacity(participants.len());
    for resident in participants {
        if working.is_empty() {
            break;
        }
        winners.push(claim(resident, working, 0));
    }
    winners
}

fn commit(
    spaces: &[ParkingSpace],
    residents: &[Resident],
    winners: Vec<Assignment>,
    unknown_residents: Vec<ResidentId>,
) -> DrawOutcome {
    let won_spaces: HashSet<&SpaceId> = winners.iter().map(|won| &won.space.id).collect();
    let won_residents: HashSet<&ResidentId> =
        winners.iter().map(|won| &won.resident.id).collect();

    let spaces = spaces
        .iter()
        .map(|space| {
            let mut space = space.clone();
            if won_spaces.contains(&space.id) {
                space.available = false;
            }
            space
        })
        .collect();
    let residents = residents
        .iter()
        .filter(|resident| !won_residents.contains(&resident.id))
        .cloned()
        .collect();

    DrawOutcome {
        winners,
        spaces,
        residents,
        unknown_residents,
    }
}

/// Which side of a draw ran short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortfall {
    Spaces,
    Residents,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::Spaces => f.write_str("eligible parking space(s)"),
            Shortfall::Residents => f.write_str("available resident(s)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("requested {requested} participant(s) but only {available} {shortfall} remain")]
pub struct CapacityError {
    pub shortfall: Shortfall,
    pub requested: usize,
    pub available: usize,
}

/// Reasons a draw was refused. None of them leave pools or history changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotteryError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(
        "unsatisfiable allocation: {deferred} deferred resident(s) left without a space after {placed} assignment(s)"
    )]
    Unsatisfiable { deferred: usize, placed: usize },
    #[error("invalid lottery rules: {0}")]
    Configuration(#[from] RuleConfigError),
    #[error("a draw needs at least one participant")]
    EmptyDraw,
    #[error("resident(s) not in the available pool: {}", join_ids(.0))]
    UnknownResidents(Vec<ResidentId>),
}

impl LotteryError {
    pub const fn kind(&self) -> &'static str {
        match self {
            LotteryError::Capacity(_) => "capacity",
            LotteryError::Unsatisfiable { .. } => "unsatisfiable",
            LotteryError::Configuration(_) => "configuration",
            LotteryError::EmptyDraw => "empty_draw",
            LotteryError::UnknownResidents(_) => "unknown_residents",
        }
    }
}

fn join_ids(ids: &[ResidentId]) -> String {
    ids.iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
