use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{AreaCode, LotteryRound, ParkingSpace, Resident};
use super::engine::{AllocationEngine, DrawRequest, DrawStrategy, LotteryError};
use super::inventory::{standard_residents, standard_spaces};
use super::rules::eligible_count;
use super::rules::RuleSet;

/// Available residents per area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCounts {
    pub s: usize,
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub total: usize,
}

impl AreaCounts {
    pub fn tally<'a, I>(residents: I) -> Self
    where
        I: IntoIterator<Item = &'a Resident>,
    {
        residents
            .into_iter()
            .fold(Self::default(), |mut counts, resident| {
                match resident.area {
                    AreaCode::S => counts.s += 1,
                    AreaCode::A => counts.a += 1,
                    AreaCode::B => counts.b += 1,
                    AreaCode::C => counts.c += 1,
                }
                counts.total += 1;
                counts
            })
    }

    pub fn get(&self, area: AreaCode) -> usize {
        match area {
            AreaCode::S => self.s,
            AreaCode::A => self.a,
            AreaCode::B => self.b,
            AreaCode::C => self.c,
        }
    }
}

/// What a rule set would open up, computed without drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPreview {
    pub strategy: DrawStrategy,
    pub eligible_spaces: usize,
    pub available_residents: AreaCounts,
}

/// Owned lottery state for one session: the initial roster and inventory, the current
/// pools, and the append-only round history.
#[derive(Debug, Clone)]
pub struct LotterySession {
    roster: Vec<Resident>,
    inventory: Vec<ParkingSpace>,
    spaces: Vec<ParkingSpace>,
    residents: Vec<Resident>,
    history: Vec<LotteryRound>,
    engine: AllocationEngine,
}

impl LotterySession {
    pub fn new(roster: Vec<Resident>, inventory: Vec<ParkingSpace>) -> Self {
        Self {
            spaces: inventory.clone(),
            residents: roster.clone(),
            roster,
            inventory,
            history: Vec::new(),
            engine: AllocationEngine::default(),
        }
    }

    /// Session over the built-in roster and car-park inventory.
    pub fn standard() -> Self {
        Self::new(standard_residents(), standard_spaces())
    }

    pub fn with_engine(mut self, engine: AllocationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Run one round. Pools and history only change when the draw succeeds.
    pub fn draw<R>(
        &mut self,
        request: &DrawRequest,
        rng: &mut R,
    ) -> Result<&LotteryRound, LotteryError>
    where
        R: Rng,
    {
        let outcome = self
            .engine
            .draw(&self.spaces, &self.residents, request, rng)?;

        let round = LotteryRound {
            round: self.next_round(),
            winners: outcome.winners,
            rules: request.rules,
            strategy: request.strategy,
            unknown_residents: outcome.unknown_residents,
            drawn_at: Utc::now(),
        };

        self.spaces = outcome.spaces;
        self.residents = outcome.residents;
        let index = self.history.len();
        self.history.push(round);
        Ok(&self.history[index])
    }

    /// Reopen every space in the inventory, restore the full roster, and clear history.
    pub fn reset(&mut self) {
        let spaces = self
            .inventory
            .iter()
            .cloned()
            .map(|mut space| {
                space.available = true;
                space
            })
            .collect();
        let residents = self.roster.clone();

        self.spaces = spaces;
        self.residents = residents;
        self.history.clear();
    }

    pub fn preview(
        &self,
        rules: &RuleSet,
        strategy: DrawStrategy,
    ) -> Result<DrawPreview, LotteryError> {
        rules.validate()?;
        Ok(DrawPreview {
            strategy,
            eligible_spaces: eligible_count(&self.spaces, rules, strategy.eligibility_mode()),
            available_residents: self.area_counts(),
        })
    }

    pub fn next_round(&self) -> u32 {
        u32::try_from(self.history.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    pub fn history(&self) -> &[LotteryRound] {
        &self.history
    }

    /// Every space record, including the ones already won.
    pub fn spaces(&self) -> &[ParkingSpace] {
        &self.spaces
    }

    pub fn available_spaces(&self) -> Vec<&ParkingSpace> {
        self.spaces.iter().filter(|space| space.available).collect()
    }

    pub fn available_residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn area_counts(&self) -> AreaCounts {
        AreaCounts::tally(&self.residents)
    }

    pub fn roster(&self) -> &[Resident] {
        &self.roster
    }

    pub fn inventory(&self) -> &[ParkingSpace] {
        &self.inventory
    }
}

impl Default for LotterySession {
    fn default() -> Self {
        Self::standard()
    }
}
