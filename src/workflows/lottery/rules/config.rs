use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Eligibility and priority toggles for a single lottery round.
///
/// Build rule sets through [`RuleSet::toggle`] so the mutual-exclusion rules between
/// `no_restriction` and the filtering toggles hold; [`RuleSet::validate`] rejects rule
/// sets that were assembled field by field and break them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub no_restriction: bool,
    pub only_store: bool,
    pub only_disabled: bool,
    pub only_motorcycle: bool,
    pub large_priority: bool,
    pub exclude_store: bool,
    pub exclude_disabled: bool,
    pub exclude_motorcycle: bool,
    pub area_restriction: bool,
}

/// Names each toggle of a [`RuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleToggle {
    NoRestriction,
    OnlyStore,
    OnlyDisabled,
    OnlyMotorcycle,
    LargePriority,
    ExcludeStore,
    ExcludeDisabled,
    ExcludeMotorcycle,
    AreaRestriction,
}

impl RuleToggle {
    pub const ALL: [RuleToggle; 9] = [
        RuleToggle::NoRestriction,
        RuleToggle::OnlyStore,
        RuleToggle::OnlyDisabled,
        RuleToggle::OnlyMotorcycle,
        RuleToggle::LargePriority,
        RuleToggle::ExcludeStore,
        RuleToggle::ExcludeDisabled,
        RuleToggle::ExcludeMotorcycle,
        RuleToggle::AreaRestriction,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            RuleToggle::NoRestriction => "no_restriction",
            RuleToggle::OnlyStore => "only_store",
            RuleToggle::OnlyDisabled => "only_disabled",
            RuleToggle::OnlyMotorcycle => "only_motorcycle",
            RuleToggle::LargePriority => "large_priority",
            RuleToggle::ExcludeStore => "exclude_store",
            RuleToggle::ExcludeDisabled => "exclude_disabled",
            RuleToggle::ExcludeMotorcycle => "exclude_motorcycle",
            RuleToggle::AreaRestriction => "area_restriction",
        }
    }

    /// Toggles that may be switched on without clearing `no_restriction`.
    pub const fn coexists_with_no_restriction(self) -> bool {
        matches!(self, RuleToggle::LargePriority | RuleToggle::AreaRestriction)
    }
}

impl fmt::Display for RuleToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RuleToggle {
    type Err = RuleConfigError;

    /// Accepts snake_case, kebab-case, and camelCase spellings.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        RuleToggle::ALL
            .into_iter()
            .find(|toggle| toggle.key().replace('_', "") == normalized)
            .ok_or_else(|| RuleConfigError::UnknownToggle(value.trim().to_string()))
    }
}

impl RuleSet {
    /// The form default: every space is drawable.
    pub fn unrestricted() -> Self {
        Self {
            no_restriction: true,
            ..Self::default()
        }
    }

    pub fn from_toggles<I>(toggles: I) -> Self
    where
        I: IntoIterator<Item = RuleToggle>,
    {
        toggles
            .into_iter()
            .fold(Self::default(), |rules, toggle| rules.with(toggle))
    }

    pub fn with(mut self, toggle: RuleToggle) -> Self {
        self.toggle(toggle, true);
        self
    }

    pub fn is_set(&self, toggle: RuleToggle) -> bool {
        match toggle {
            RuleToggle::NoRestriction => self.no_restriction,
            RuleToggle::OnlyStore => self.only_store,
            RuleToggle::OnlyDisabled => self.only_disabled,
            RuleToggle::OnlyMotorcycle => self.only_motorcycle,
            RuleToggle::LargePriority => self.large_priority,
            RuleToggle::ExcludeStore => self.exclude_store,
            RuleToggle::ExcludeDisabled => self.exclude_disabled,
            RuleToggle::ExcludeMotorcycle => self.exclude_motorcycle,
            RuleToggle::AreaRestriction => self.area_restriction,
        }
    }

    fn flag_mut(&mut self, toggle: RuleToggle) -> &mut bool {
        match toggle {
            RuleToggle::NoRestriction => &mut self.no_restriction,
            RuleToggle::OnlyStore => &mut self.only_store,
            RuleToggle::OnlyDisabled => &mut self.only_disabled,
            RuleToggle::OnlyMotorcycle => &mut self.only_motorcycle,
            RuleToggle::LargePriority => &mut self.large_priority,
            RuleToggle::ExcludeStore => &mut self.exclude_store,
            RuleToggle::ExcludeDisabled => &mut self.exclude_disabled,
            RuleToggle::ExcludeMotorcycle => &mut self.exclude_motorcycle,
            RuleToggle::AreaRestriction => &mut self.area_restriction,
        }
    }

    /// Apply a checkbox change the way the lottery form does.
    ///
    /// Turning `no_restriction` on clears every other toggle. Changing any other toggle,
    /// except `large_priority` and `area_restriction`, clears `no_restriction`.
    pub fn toggle(&mut self, toggle: RuleToggle, value: bool) {
        if toggle == RuleToggle::NoRestriction && value {
            *self = Self::unrestricted();
            return;
        }

        *self.flag_mut(toggle) = value;
        if !toggle.coexists_with_no_restriction() {
            self.no_restriction = false;
        }
    }

    pub fn active(&self) -> Vec<RuleToggle> {
        RuleToggle::ALL
            .into_iter()
            .filter(|toggle| self.is_set(*toggle))
            .collect()
    }

    /// Reject rule sets that combine `no_restriction` with a filtering toggle.
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        if !self.no_restriction {
            return Ok(());
        }

        let conflicting: Vec<RuleToggle> = self
            .active()
            .into_iter()
            .filter(|toggle| {
                *toggle != RuleToggle::NoRestriction && !toggle.coexists_with_no_restriction()
            })
            .collect();

        if conflicting.is_empty() {
            Ok(())
        } else {
            Err(RuleConfigError::NoRestrictionCombined {
                toggles: conflicting,
            })
        }
    }
}

/// Configuration errors for rule sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("no_restriction cannot be combined with {}", join_toggles(.toggles))]
    NoRestrictionCombined { toggles: Vec<RuleToggle> },
    #[error("unknown lottery rule '{0}'")]
    UnknownToggle(String),
}

fn join_toggles(toggles: &[RuleToggle]) -> String {
    toggles
        .iter()
        .map(|toggle| toggle.key())
        .collect::<Vec<_>>()
        .join(", ")
}
