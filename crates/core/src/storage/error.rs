use std::fmt;

use thiserror::Error;

/// Repository step an error or cancellation happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePhase {
    /// Draining the result set to compute the exact total.
    Count,
    /// Collecting enough items to fill the requested page.
    Fetch,
    Save,
    Lookup,
}

impl StorePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorePhase::Count => "count",
            StorePhase::Fetch => "fetch",
            StorePhase::Save => "save",
            StorePhase::Lookup => "lookup",
        }
    }
}

impl fmt::Display for StorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("{phase} cancelled")]
    Cancelled { phase: StorePhase },
    #[error("{phase} failed: {source}")]
    Phase {
        phase: StorePhase,
        #[source]
        source: Box<RepositoryError>,
    },
}

impl RepositoryError {
    /// Tags the error with the phase it happened in. Errors that already
    /// carry a phase are returned unchanged.
    pub fn in_phase(self, phase: StorePhase) -> Self {
        match self {
            RepositoryError::Phase { .. } | RepositoryError::Cancelled { .. } => self,
            other => RepositoryError::Phase {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// Phase the error was tagged with, if any.
    pub fn phase(&self) -> Option<StorePhase> {
        match self {
            RepositoryError::Phase { phase, .. } | RepositoryError::Cancelled { phase } => {
                Some(*phase)
            }
            _ => None,
        }
    }

    /// The underlying store error, without phase wrapping.
    pub fn root(&self) -> &RepositoryError {
        match self {
            RepositoryError::Phase { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "MatchAnnouncement",
            id: "01J0000000000000000000000".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "MatchAnnouncement not found: 01J0000000000000000000000"
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_phase_wrapping_names_the_phase() {
        let error = RepositoryError::QueryFailed("throttled".to_string()).in_phase(StorePhase::Count);
        assert_eq!(error.to_string(), "count failed: Query failed: throttled");
        assert_eq!(error.phase(), Some(StorePhase::Count));
        assert_eq!(
            error.root(),
            &RepositoryError::QueryFailed("throttled".to_string())
        );
    }

    #[test]
    fn test_phase_wrapping_is_applied_once() {
        let error = RepositoryError::InvalidData("bad record".to_string())
            .in_phase(StorePhase::Fetch)
            .in_phase(StorePhase::Count);
        assert_eq!(error.phase(), Some(StorePhase::Fetch));

        let cancelled = RepositoryError::Cancelled {
            phase: StorePhase::Count,
        }
        .in_phase(StorePhase::Fetch);
        assert_eq!(cancelled.to_string(), "count cancelled");
    }

    #[test]
    fn test_phase_error_exposes_source() {
        use std::error::Error as _;

        let error = RepositoryError::QueryFailed("boom".to_string()).in_phase(StorePhase::Save);
        assert_eq!(
            error.source().map(|source| source.to_string()),
            Some("Query failed: boom".to_string())
        );
    }
}
