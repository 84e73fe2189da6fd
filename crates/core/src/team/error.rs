use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("team name cannot be empty")]
    EmptyName,
    #[error("sport cannot be empty")]
    EmptySport,
}
