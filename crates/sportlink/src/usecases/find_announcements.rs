use tokio_util::sync::CancellationToken;

use sportlink_core::announcement::{FindAnnouncementsParams, MatchAnnouncement};
use sportlink_core::storage::{AnnouncementRepository, Page};

use super::UseCaseError;

/// Searches announcements. An empty result is a valid page, not an error.
pub async fn find_announcements(
    announcements: &dyn AnnouncementRepository,
    params: FindAnnouncementsParams,
    cancel: &CancellationToken,
) -> Result<Page<MatchAnnouncement>, UseCaseError> {
    let query = params.into_query()?;
    tracing::debug!(query = ?query, "Finding match announcements");

    let page = announcements.find(&query, cancel).await?;

    tracing::info!(
        total = page.page.total,
        returned = page.entities.len(),
        page = page.page.number,
        out_of = page.page.out_of,
        "Found match announcements"
    );
    Ok(page)
}
