//! Match announcement handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use sportlink_core::announcement::{
    AnnouncementResponse, ChangeStatusRequest, CreateAnnouncementRequest,
    FindAnnouncementsParams, PaginatedAnnouncementsResponse,
};

use crate::{
    handlers::{error::InvalidRequestFormat, AppError},
    state::AppState,
    usecases,
};

/// Publish a match announcement (POST /api/match-announcements).
pub async fn create_announcement(
    State(state): State<AppState>,
    body: Result<Json<CreateAnnouncementRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body.map_err(|e| InvalidRequestFormat(e.body_text()))?;
    tracing::debug!(request = ?request, "Received create match announcement request");

    let announcement = usecases::create_announcement(
        &state.validator,
        state.teams.as_ref(),
        state.announcements.as_ref(),
        request,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnnouncementResponse::from(&announcement)),
    ))
}

/// Search match announcements (GET /api/match-announcements).
///
/// An empty result is a 200 with empty `data`.
pub async fn find_announcements(
    State(state): State<AppState>,
    params: Result<Query<FindAnnouncementsParams>, QueryRejection>,
) -> Result<Json<PaginatedAnnouncementsResponse>, AppError> {
    let Query(params) = params.map_err(|e| InvalidRequestFormat(e.body_text()))?;

    let cancel = state.request_token();
    let page =
        usecases::find_announcements(state.announcements.as_ref(), params, &cancel).await?;

    Ok(Json(PaginatedAnnouncementsResponse::from(&page)))
}

/// Move an announcement to another status
/// (PATCH /api/match-announcements/{id}/status).
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ChangeStatusRequest>, JsonRejection>,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let Json(request) = body.map_err(|e| InvalidRequestFormat(e.body_text()))?;

    let announcement =
        usecases::change_status(state.announcements.as_ref(), &id, request.status).await?;

    Ok(Json(AnnouncementResponse::from(&announcement)))
}
