mod clauses;
mod config;
mod narrowing;

pub use clauses::{eligible_count, eligible_spaces, is_eligible, EligibilityMode};
pub use config::{RuleConfigError, RuleSet, RuleToggle};

pub(crate) use narrowing::candidate_indices;
