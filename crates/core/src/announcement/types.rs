use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use ulid::Ulid;

use crate::common::Sport;

use super::{AnnouncementError, CategoryRange, Location, Status, TimeSlot};

/// How long a stored announcement is kept before the store may drop it.
pub const ANNOUNCEMENT_TTL_DAYS: i64 = 30;

/// An open invitation from a team to play a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchAnnouncement {
    /// Time-sortable identifier, assigned once at creation.
    pub id: Ulid,
    pub team_name: String,
    pub sport: Sport,
    pub day: NaiveDate,
    pub time_slot: TimeSlot,
    pub location: Location,
    pub admitted_categories: CategoryRange,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
}

/// Fields supplied by the publisher of a new announcement.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub team_name: String,
    pub sport: Sport,
    pub day: NaiveDate,
    pub time_slot: TimeSlot,
    pub location: Location,
    pub admitted_categories: CategoryRange,
    pub created_at: DateTime<FixedOffset>,
}

impl MatchAnnouncement {
    /// Creates a pending announcement with a fresh id.
    pub fn new(fields: NewAnnouncement) -> Self {
        Self {
            id: Ulid::new(),
            team_name: fields.team_name,
            sport: fields.sport,
            day: fields.day,
            time_slot: fields.time_slot,
            location: fields.location,
            admitted_categories: fields.admitted_categories,
            status: Status::Pending,
            created_at: fields.created_at,
        }
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Ulid) -> Self {
        self.id = id;
        self
    }

    /// Moves the announcement to `next`, if the lifecycle allows it.
    pub fn transition_to(&mut self, next: Status) -> Result<(), AnnouncementError> {
        if !self.status.can_transition_to(next) {
            return Err(AnnouncementError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Storage expiry hint. Not part of the domain state.
    pub fn expires_at(&self) -> DateTime<FixedOffset> {
        self.created_at + TimeDelta::days(ANNOUNCEMENT_TTL_DAYS)
    }
}
