use ulid::Ulid;

use sportlink_core::announcement::{MatchAnnouncement, Status};
use sportlink_core::storage::AnnouncementRepository;

use super::UseCaseError;

/// Moves an announcement along its lifecycle and stores the result.
pub async fn change_status(
    announcements: &dyn AnnouncementRepository,
    id: &str,
    next: Status,
) -> Result<MatchAnnouncement, UseCaseError> {
    let ulid = Ulid::from_string(id).map_err(|_| UseCaseError::InvalidId(id.to_string()))?;

    let mut announcement = announcements
        .get(ulid)
        .await?
        .ok_or_else(|| UseCaseError::NotFound(id.to_string()))?;

    let previous = announcement.status;
    announcement
        .transition_to(next)
        .map_err(UseCaseError::Transition)?;
    announcements
        .save(&announcement)
        .await
        .map_err(UseCaseError::Save)?;

    tracing::info!(
        announcement_id = %announcement.id,
        from = %previous,
        to = %next,
        "Changed match announcement status"
    );
    Ok(announcement)
}
