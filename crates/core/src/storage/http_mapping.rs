//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Cancelled` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `InvalidData` -> 400 (Bad Request)
/// - `Phase` -> the code of the wrapped error
///
/// # Examples
///
/// ```
/// use sportlink_core::storage::{repository_error_to_status_code, RepositoryError, StorePhase};
///
/// let error = RepositoryError::ConnectionFailed("timeout".to_string()).in_phase(StorePhase::Count);
/// assert_eq!(repository_error_to_status_code(&error), 503);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::Cancelled { .. } => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::Phase { source, .. } => repository_error_to_status_code(source),
    }
}
