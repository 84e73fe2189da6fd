use thiserror::Error;

use sportlink_core::announcement::{AnnouncementError, QueryParamError, RequestError};
use sportlink_core::common::Sport;
use sportlink_core::storage::RepositoryError;
use sportlink_core::team::TeamError;

/// Failures surfaced by the use cases.
///
/// Structural problems (`Request`, `Query`, `Validation`, `Team`,
/// `InvalidId`, `Transition`) are told apart from referential ones
/// (`TeamNotFound`, `NotFound`) and from store failures, which keep the underlying
/// [`RepositoryError`] as their source.
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Query(#[from] QueryParamError),

    #[error(transparent)]
    Validation(AnnouncementError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error("team '{name}' for sport '{sport}' does not exist")]
    TeamNotFound { name: String, sport: Sport },

    #[error("invalid match announcement id: {0}")]
    InvalidId(String),

    #[error("match announcement not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Transition(AnnouncementError),

    #[error("error while finding team: {0}")]
    TeamLookup(#[source] RepositoryError),

    #[error("error while inserting match announcement in database: {0}")]
    Save(#[source] RepositoryError),

    #[error("error while inserting team in database: {0}")]
    SaveTeam(#[source] RepositoryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    /// The store failure behind this error, if any.
    pub fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            UseCaseError::TeamLookup(e)
            | UseCaseError::Save(e)
            | UseCaseError::SaveTeam(e)
            | UseCaseError::Repository(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportlink_core::storage::StorePhase;

    #[test]
    fn test_team_not_found_display() {
        let error = UseCaseError::TeamNotFound {
            name: "Los Pumas".to_string(),
            sport: Sport::new("Football"),
        };
        assert_eq!(
            error.to_string(),
            "team 'Los Pumas' for sport 'Football' does not exist"
        );
    }

    #[test]
    fn test_save_error_keeps_store_failure() {
        let store = RepositoryError::ConnectionFailed("timeout".to_string())
            .in_phase(StorePhase::Save);
        let error = UseCaseError::Save(store.clone());

        assert_eq!(
            error.to_string(),
            "error while inserting match announcement in database: save failed: Connection failed: timeout"
        );
        assert_eq!(error.repository_error(), Some(&store));
    }

    #[test]
    fn test_structural_errors_have_no_store_failure() {
        let error = UseCaseError::Validation(AnnouncementError::EmptySport);
        assert!(error.repository_error().is_none());
    }
}
