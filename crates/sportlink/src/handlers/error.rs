use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use sportlink_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::usecases::UseCaseError;

/// Machine-readable error kind sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequestFormat,
    RequestValidationFailed,
    NotFound,
    UseCaseExecutionError,
    UnexpectedError,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

/// A request body or query string that could not be decoded.
#[derive(Debug, Error)]
#[error("invalid request format: {0}")]
pub struct InvalidRequestFormat(pub String);

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn classify(&self) -> (StatusCode, ErrorCode) {
        if let Some(error) = self.0.downcast_ref::<UseCaseError>() {
            return use_case_error_status(error);
        }
        if let Some(error) = self.0.downcast_ref::<RepositoryError>() {
            return (repository_status(error), ErrorCode::UnexpectedError);
        }
        if self.0.is::<InvalidRequestFormat>() {
            return (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequestFormat);
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::UnexpectedError,
        )
    }
}

fn repository_status(error: &RepositoryError) -> StatusCode {
    let code = repository_error_to_status_code(error);
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Maps a use case failure to its HTTP status and error code.
pub fn use_case_error_status(error: &UseCaseError) -> (StatusCode, ErrorCode) {
    match error {
        UseCaseError::Request(_)
        | UseCaseError::Query(_)
        | UseCaseError::Validation(_)
        | UseCaseError::Team(_)
        | UseCaseError::InvalidId(_) => {
            (StatusCode::BAD_REQUEST, ErrorCode::RequestValidationFailed)
        }
        UseCaseError::TeamNotFound { .. } | UseCaseError::Transition(_) => {
            (StatusCode::CONFLICT, ErrorCode::UseCaseExecutionError)
        }
        UseCaseError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        UseCaseError::TeamLookup(source)
        | UseCaseError::Save(source)
        | UseCaseError::SaveTeam(source)
        | UseCaseError::Repository(source) => {
            (repository_status(source), ErrorCode::UseCaseExecutionError)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use sportlink_core::announcement::AnnouncementError;
    use sportlink_core::common::Sport;
    use sportlink_core::storage::StorePhase;

    use super::*;

    async fn body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_use_case_error_statuses() {
        let cases = [
            (
                UseCaseError::Validation(AnnouncementError::DayInPast),
                StatusCode::BAD_REQUEST,
            ),
            (
                UseCaseError::TeamNotFound {
                    name: "Los Pumas".to_string(),
                    sport: Sport::new("Football"),
                },
                StatusCode::CONFLICT,
            ),
            (
                UseCaseError::NotFound("01J0000000000000000000000".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                UseCaseError::Save(
                    RepositoryError::ConnectionFailed("timeout".to_string())
                        .in_phase(StorePhase::Save),
                ),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                UseCaseError::Repository(RepositoryError::Cancelled {
                    phase: StorePhase::Count,
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(use_case_error_status(&error).0, expected, "{error}");
        }
    }

    #[tokio::test]
    async fn test_response_body_carries_code_and_message() {
        let error = AppError::from(UseCaseError::TeamNotFound {
            name: "Los Pumas".to_string(),
            sport: Sport::new("Football"),
        });

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body(response).await;
        assert_eq!(json["code"], "use_case_execution_error");
        assert_eq!(
            json["message"],
            "team 'Los Pumas' for sport 'Football' does not exist"
        );
    }

    #[tokio::test]
    async fn test_malformed_request_is_bad_request() {
        let error = AppError::from(InvalidRequestFormat("expected value".to_string()));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await["code"], "invalid_request_format");
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let error = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
