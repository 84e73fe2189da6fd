//! Team registration handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use sportlink_core::team::CreateTeamRequest;

use crate::{
    handlers::{error::InvalidRequestFormat, AppError},
    state::AppState,
    usecases,
};

/// Register a team (POST /api/teams).
pub async fn create_team(
    State(state): State<AppState>,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body.map_err(|e| InvalidRequestFormat(e.body_text()))?;
    let team = usecases::create_team(state.teams.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}
