use std::sync::{Arc, Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::domain::{LotteryRound, ParkingSpace};
use super::engine::{AllocationEngine, DrawRequest, DrawStrategy, LotteryError};
use super::publisher::{RoundNotice, RoundPublisher};
use super::rules::RuleSet;
use super::session::{DrawPreview, LotterySession};
use super::views::{PoolView, ResidentPoolView};
use crate::config::LotteryConfig;

struct ServiceState {
    session: LotterySession,
    rng: StdRng,
}

/// Service owning one lottery session and its random source.
///
/// Every call holds the session lock for its whole duration, so at most one round is in
/// flight and a reset never interleaves with a draw.
pub struct LotteryService<P> {
    state: Mutex<ServiceState>,
    publisher: Arc<P>,
    default_strategy: DrawStrategy,
}

impl<P> LotteryService<P>
where
    P: RoundPublisher + 'static,
{
    pub fn new(session: LotterySession, publisher: Arc<P>, config: &LotteryConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = session.with_engine(AllocationEngine::new(config.unknown_residents));

        Self {
            state: Mutex::new(ServiceState { session, rng }),
            publisher,
            default_strategy: config.default_strategy,
        }
    }

    pub fn default_strategy(&self) -> DrawStrategy {
        self.default_strategy
    }

    fn lock(&self) -> Result<MutexGuard<'_, ServiceState>, LotteryServiceError> {
        self.state.lock().map_err(|_| LotteryServiceError::Poisoned)
    }

    /// Run and commit one round, then hand it to the publisher.
    ///
    /// Notices go out under the session lock so subscribers see rounds in order. A
    /// committed round is returned even when its notice cannot be delivered.
    pub fn draw(&self, request: DrawRequest) -> Result<LotteryRound, LotteryServiceError> {
        let mut guard = self.lock()?;
        let ServiceState { session, rng } = &mut *guard;
        let round = session.draw(&request, rng)?.clone();

        info!(
            round = round.round,
            winners = round.winners.len(),
            strategy = round.strategy.label(),
            unknown = round.unknown_residents.len(),
            "lottery round committed"
        );

        if let Err(error) = self.publisher.publish(RoundNotice::from_round(&round)) {
            warn!(round = round.round, %error, "round notice not delivered");
        }
        Ok(round)
    }

    pub fn reset(&self) -> Result<PoolView, LotteryServiceError> {
        let mut guard = self.lock()?;
        let discarded = guard.session.history().len();
        guard.session.reset();
        info!(discarded_rounds = discarded, "lottery session reset");
        Ok(PoolView::from_session(&guard.session))
    }

    pub fn history(&self) -> Result<Vec<LotteryRound>, LotteryServiceError> {
        let guard = self.lock()?;
        Ok(guard.session.history().to_vec())
    }

    /// Count what a rule set would open up; falls back to the configured strategy.
    pub fn preview(
        &self,
        rules: &RuleSet,
        strategy: Option<DrawStrategy>,
    ) -> Result<DrawPreview, LotteryServiceError> {
        let guard = self.lock()?;
        let preview = guard
            .session
            .preview(rules, strategy.unwrap_or(self.default_strategy))?;
        Ok(preview)
    }

    pub fn snapshot(&self) -> Result<PoolView, LotteryServiceError> {
        let guard = self.lock()?;
        Ok(PoolView::from_session(&guard.session))
    }

    pub fn available_spaces(&self) -> Result<Vec<ParkingSpace>, LotteryServiceError> {
        let guard = self.lock()?;
        Ok(guard
            .session
            .available_spaces()
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn available_residents(&self) -> Result<ResidentPoolView, LotteryServiceError> {
        let guard = self.lock()?;
        Ok(ResidentPoolView::from_session(&guard.session))
    }
}

/// Error raised by the lottery service.
#[derive(Debug, thiserror::Error)]
pub enum LotteryServiceError {
    #[error(transparent)]
    Lottery(#[from] LotteryError),
    #[error("lottery session lock poisoned")]
    Poisoned,
}
