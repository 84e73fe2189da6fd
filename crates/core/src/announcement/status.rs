use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StatusError;

/// Lifecycle state of a match announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Published, waiting for responses.
    Pending,
    /// Match agreed with another team.
    Confirmed,
    /// Withdrawn by the publishing team.
    Cancelled,
    /// Past its usefulness.
    Expired,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Confirmed,
        Status::Cancelled,
        Status::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Confirmed => "CONFIRMED",
            Status::Cancelled => "CANCELLED",
            Status::Expired => "EXPIRED",
        }
    }

    /// Returns true if `raw` names one of the known statuses.
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<Status>().is_ok()
    }

    /// Cancelled and expired announcements never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Cancelled | Status::Expired)
    }

    pub fn can_transition_to(&self, next: Status) -> bool {
        if self.is_terminal() {
            return false;
        }
        match self {
            Status::Pending => matches!(
                next,
                Status::Confirmed | Status::Cancelled | Status::Expired
            ),
            _ => matches!(next, Status::Cancelled | Status::Expired),
        }
    }
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
