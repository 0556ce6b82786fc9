use serde::{Deserialize, Serialize};

use super::super::domain::{AllocationZone, ParkingSpace, SpaceSize};
use super::config::{RuleSet, RuleToggle};

/// Where an eligibility check runs.
///
/// The direct draw filters the pool once and treats `large_priority` as a hard gate.
/// The matched draw leaves size priority to per-resident narrowing instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityMode {
    PoolFilter,
    Matching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseKind {
    /// When the toggle is set, the predicate decides eligibility outright.
    Only,
    /// When the toggle is set and the predicate holds, the space is ineligible.
    Exclude,
}

struct EligibilityClause {
    toggle: RuleToggle,
    kind: ClauseKind,
    matches: fn(&ParkingSpace) -> bool,
    pool_filter_only: bool,
}

fn any_space(_: &ParkingSpace) -> bool {
    true
}

fn is_store(space: &ParkingSpace) -> bool {
    space.zone == AllocationZone::Store
}

fn is_accessible(space: &ParkingSpace) -> bool {
    space.size == SpaceSize::Accessible
}

fn is_motorcycle(space: &ParkingSpace) -> bool {
    space.zone == AllocationZone::Motorcycle
}

fn is_large(space: &ParkingSpace) -> bool {
    space.size == SpaceSize::Large
}

/// Evaluated top to bottom; the first `Only` clause whose toggle is set wins.
const CLAUSES: [EligibilityClause; 8] = [
    EligibilityClause {
        toggle: RuleToggle::NoRestriction,
        kind: ClauseKind::Only,
        matches: any_space,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::OnlyStore,
        kind: ClauseKind::Only,
        matches: is_store,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::OnlyDisabled,
        kind: ClauseKind::Only,
        matches: is_accessible,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::OnlyMotorcycle,
        kind: ClauseKind::Only,
        matches: is_motorcycle,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::LargePriority,
        kind: ClauseKind::Only,
        matches: is_large,
        pool_filter_only: true,
    },
    EligibilityClause {
        toggle: RuleToggle::ExcludeStore,
        kind: ClauseKind::Exclude,
        matches: is_store,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::ExcludeDisabled,
        kind: ClauseKind::Exclude,
        matches: is_accessible,
        pool_filter_only: false,
    },
    EligibilityClause {
        toggle: RuleToggle::ExcludeMotorcycle,
        kind: ClauseKind::Exclude,
        matches: is_motorcycle,
        pool_filter_only: false,
    },
];

/// Whether `space` passes the rule gate. Availability is not considered here.
pub fn is_eligible(space: &ParkingSpace, rules: &RuleSet, mode: EligibilityMode) -> bool {
    let clauses = CLAUSES
        .iter()
        .filter(|clause| mode == EligibilityMode::PoolFilter || !clause.pool_filter_only);

    for clause in clauses {
        if !rules.is_set(clause.toggle) {
            continue;
        }

        match clause.kind {
            ClauseKind::Only => return (clause.matches)(space),
            ClauseKind::Exclude if (clause.matches)(space) => return false,
            ClauseKind::Exclude => {}
        }
    }

    true
}

/// Available spaces that pass the rule gate, in pool order.
pub fn eligible_spaces<'a>(
    pool: &'a [ParkingSpace],
    rules: &RuleSet,
    mode: EligibilityMode,
) -> Vec<&'a ParkingSpace> {
    pool.iter()
        .filter(|space| space.available && is_eligible(space, rules, mode))
        .collect()
}

pub fn eligible_count(pool: &[ParkingSpace], rules: &RuleSet, mode: EligibilityMode) -> usize {
    eligible_spaces(pool, rules, mode).len()
}
