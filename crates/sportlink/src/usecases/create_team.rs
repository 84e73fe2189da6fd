use sportlink_core::storage::TeamRepository;
use sportlink_core::team::{CreateTeamRequest, Team};

use super::UseCaseError;

/// Registers a team so it can publish announcements. Registering the same
/// name and sport again replaces the stored team.
pub async fn create_team(
    teams: &dyn TeamRepository,
    request: CreateTeamRequest,
) -> Result<Team, UseCaseError> {
    let team = request.into_team()?;
    teams.save_team(&team).await.map_err(UseCaseError::SaveTeam)?;

    tracing::info!(team_id = %team.id, category = %team.category, "Registered team");
    Ok(team)
}
