//! Parking-space lottery: rule evaluation, the allocation engine, and the session and
//! service layers that carry pools from one round to the next.

pub mod domain;
pub mod engine;
pub mod inventory;
pub mod publisher;
pub mod router;
pub mod rules;
pub mod service;
pub mod session;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AllocationZone, AreaCode, Assignment, LabelError, LotteryRound, ParkingSpace, Resident,
    ResidentId, SpaceId, SpaceSize,
};
pub use engine::{
    AllocationEngine, CapacityError, DrawOutcome, DrawRequest, DrawStrategy, LotteryError,
    Participants, Shortfall, UnknownResidentPolicy,
};
pub use inventory::{standard_residents, standard_spaces};
pub use publisher::{NoopPublisher, PublishError, RoundNotice, RoundPublisher};
pub use router::{lottery_router, DrawSubmission, PreviewSubmission, SubmissionError};
pub use rules::{
    eligible_count, eligible_spaces, is_eligible, EligibilityMode, RuleConfigError, RuleSet,
    RuleToggle,
};
pub use service::{LotteryService, LotteryServiceError};
pub use session::{AreaCounts, DrawPreview, LotterySession};
pub use views::{PoolView, ResidentPoolView, ResidentView, RoundView, SpaceView, WinnerView};
