use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::ResidentId;
use super::engine::{DrawRequest, DrawStrategy, LotteryError, Participants};
use super::publisher::RoundPublisher;
use super::rules::RuleSet;
use super::service::{LotteryService, LotteryServiceError};
use super::views::{RoundView, SpaceView};

/// Draw request as posted by the lottery form. Exactly one of `participants` and
/// `residents` must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residents: Option<Vec<ResidentId>>,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DrawStrategy>,
}

impl DrawSubmission {
    pub fn into_request(
        self,
        default_strategy: DrawStrategy,
    ) -> Result<DrawRequest, SubmissionError> {
        let participants = match (self.participants, self.residents) {
            (Some(count), None) => Participants::Count(count),
            (None, Some(ids)) => Participants::Residents(ids),
            (Some(_), Some(_)) => return Err(SubmissionError::Ambiguous),
            (None, None) => return Err(SubmissionError::Missing),
        };

        Ok(DrawRequest {
            participants,
            rules: self.rules,
            strategy: self.strategy.unwrap_or(default_strategy),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("provide either a participant count or a resident list, not both")]
    Ambiguous,
    #[error("provide a participant count or a resident list")]
    Missing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewSubmission {
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<DrawStrategy>,
}

/// Router builder exposing the lottery session over HTTP.
pub fn lottery_router<P>(service: Arc<LotteryService<P>>) -> Router
where
    P: RoundPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/lottery/draws",
            post(draw_handler::<P>).get(history_handler::<P>),
        )
        .route("/api/v1/lottery/preview", post(preview_handler::<P>))
        .route("/api/v1/lottery/reset", post(reset_handler::<P>))
        .route("/api/v1/lottery/spaces", get(spaces_handler::<P>))
        .route("/api/v1/lottery/residents", get(residents_handler::<P>))
        .with_state(service)
}

pub(crate) async fn draw_handler<P>(
    State(service): State<Arc<LotteryService<P>>>,
    axum::Json(submission): axum::Json<DrawSubmission>,
) -> Response
where
    P: RoundPublisher + 'static,
{
    let request = match submission.into_request(service.default_strategy()) {
        Ok(request) => request,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "kind": "invalid_submission",
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.draw(request) {
        Ok(round) => (StatusCode::CREATED, axum::Json(RoundView::from(&round))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<P>(State(service): State<Arc<LotteryService<P>>>) -> Response
where
    P: RoundPublisher + 'static,
{
    match service.history() {
        Ok(rounds) => {
            let views: Vec<RoundView> = rounds.iter().map(RoundView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<P>(
    State(service): State<Arc<LotteryService<P>>>,
    axum::Json(submission): axum::Json<PreviewSubmission>,
) -> Response
where
    P: RoundPublisher + 'static,
{
    match service.preview(&submission.rules, submission.strategy) {
        Ok(preview) => (StatusCode::OK, axum::Json(preview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<P>(State(service): State<Arc<LotteryService<P>>>) -> Response
where
    P: RoundPublisher + 'static,
{
    match service.reset() {
        Ok(pool) => (StatusCode::OK, axum::Json(pool)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn spaces_handler<P>(State(service): State<Arc<LotteryService<P>>>) -> Response
where
    P: RoundPublisher + 'static,
{
    match service.available_spaces() {
        Ok(spaces) => {
            let views: Vec<SpaceView> = spaces.iter().map(SpaceView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn residents_handler<P>(
    State(service): State<Arc<LotteryService<P>>>,
) -> Response
where
    P: RoundPublisher + 'static,
{
    match service.available_residents() {
        Ok(pool) => (StatusCode::OK, axum::Json(pool)).into_response(),
        Err(error) => error_response(error),
    }
}

/// HTTP status for a service failure. Shared with `AppError` so both paths agree.
pub(crate) fn status_for(error: &LotteryServiceError) -> StatusCode {
    match error {
        LotteryServiceError::Lottery(LotteryError::Unsatisfiable { .. }) => StatusCode::CONFLICT,
        LotteryServiceError::Lottery(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LotteryServiceError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(error: LotteryServiceError) -> Response {
    let status = status_for(&error);
    let payload = match &error {
        LotteryServiceError::Lottery(error) => json!({
            "error": error.to_string(),
            "kind": error.kind(),
        }),
        other => json!({
            "error": other.to_string(),
        }),
    };
    (status, axum::Json(payload)).into_response()
}
