use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

use crate::announcement::{AnnouncementQuery, MatchAnnouncement};
use crate::team::{Team, TeamQuery};

use super::{Page, Result};

/// Repository for match announcement operations.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Stores an announcement, replacing any previous version with the same id.
    async fn save(&self, announcement: &MatchAnnouncement) -> Result<()>;

    /// Gets an announcement by its ID.
    async fn get(&self, id: Ulid) -> Result<Option<MatchAnnouncement>>;

    /// Returns the requested page of matching announcements and the exact
    /// number of matches. `cancel` is checked before every store round trip.
    async fn find(
        &self,
        query: &AnnouncementQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<MatchAnnouncement>>;
}

/// Repository for team operations.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a team.
    async fn save_team(&self, team: &Team) -> Result<()>;

    /// Gets all teams matching the query.
    async fn find_teams(&self, query: &TeamQuery) -> Result<Vec<Team>>;
}
