use metrics_exporter_prometheus::PrometheusHandle;
use parking_lottery::workflows::lottery::{
    DrawStrategy, PublishError, RoundNotice, RoundPublisher, RuleToggle,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps every published notice for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRoundPublisher {
    notices: Arc<Mutex<Vec<RoundNotice>>>,
}

impl RoundPublisher for InMemoryRoundPublisher {
    fn publish(&self, notice: RoundNotice) -> Result<(), PublishError> {
        let mut guard = self
            .notices
            .lock()
            .map_err(|_| PublishError::Transport("notice log poisoned".to_string()))?;
        info!(
            round = notice.round,
            pairs = notice.pairs.len(),
            "round published"
        );
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryRoundPublisher {
    #[cfg(test)]
    pub(crate) fn notices(&self) -> Vec<RoundNotice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

pub(crate) fn parse_rule(raw: &str) -> Result<RuleToggle, String> {
    raw.parse::<RuleToggle>().map_err(|err| {
        let known: Vec<&str> = RuleToggle::ALL.iter().map(|toggle| toggle.key()).collect();
        format!("{err} (expected one of: {})", known.join(", "))
    })
}

pub(crate) fn parse_strategy(raw: &str) -> Result<DrawStrategy, String> {
    raw.parse::<DrawStrategy>()
        .map_err(|err| format!("{err} (expected 'matched' or 'direct')"))
}
