use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::lottery::router::status_for;
use crate::workflows::lottery::LotteryServiceError;
use crate::workflows::roster::RosterImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(RosterImportError),
    Lottery(LotteryServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "roster import error: {}", err),
            AppError::Lottery(err) => write!(f, "lottery error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Lottery(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Lottery(err) => status_for(err),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RosterImportError> for AppError {
    fn from(value: RosterImportError) -> Self {
        Self::Import(value)
    }
}

impl From<LotteryServiceError> for AppError {
    fn from(value: LotteryServiceError) -> Self {
        Self::Lottery(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::lottery::LotteryError;

    #[test]
    fn lottery_errors_use_the_router_status_codes() {
        let response =
            AppError::from(LotteryServiceError::from(LotteryError::EmptyDraw)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let unsatisfiable = LotteryError::Unsatisfiable {
            deferred: 2,
            placed: 1,
        };
        let response = AppError::from(LotteryServiceError::from(unsatisfiable)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::from(LotteryServiceError::Poisoned).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn import_errors_name_the_row() {
        let error = AppError::from(RosterImportError::Duplicate {
            row: 4,
            id: "A01F03".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "roster import error: row 4: duplicate identifier 'A01F03'"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
