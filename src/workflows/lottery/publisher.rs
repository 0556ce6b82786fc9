use serde::{Deserialize, Serialize};

use super::domain::{LotteryRound, ResidentId, SpaceId};
use super::engine::DrawStrategy;

/// Outbound hook for consumers of committed rounds (result boards, exports).
pub trait RoundPublisher: Send + Sync {
    fn publish(&self, notice: RoundNotice) -> Result<(), PublishError>;
}

/// Compact payload announcing a committed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundNotice {
    pub round: u32,
    pub strategy: DrawStrategy,
    pub pairs: Vec<(ResidentId, SpaceId)>,
}

impl RoundNotice {
    pub fn from_round(round: &LotteryRound) -> Self {
        Self {
            round: round.round,
            strategy: round.strategy,
            pairs: round
                .winners
                .iter()
                .map(|won| (won.resident.id.clone(), won.space.id.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("round publisher unavailable: {0}")]
    Transport(String),
}

/// Publisher that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl RoundPublisher for NoopPublisher {
    fn publish(&self, _notice: RoundNotice) -> Result<(), PublishError> {
        Ok(())
    }
}
