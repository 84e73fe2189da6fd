//! Creation rules for match announcements.

use chrono::{DateTime, Utc};

use super::{AnnouncementError, MatchAnnouncement};

#[derive(Debug, Clone, Copy)]
enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

/// Checks a new announcement before it is stored.
///
/// Built once at startup and handed to the components that need it. Rules
/// run in a fixed order and the first failure is returned.
#[derive(Debug, Clone, Copy)]
pub struct AnnouncementValidator {
    clock: Clock,
}

impl Default for AnnouncementValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementValidator {
    /// Validator that reads the system clock.
    pub fn new() -> Self {
        Self {
            clock: Clock::System,
        }
    }

    /// Validator pinned to `now` (useful for testing).
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            clock: Clock::Fixed(now),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self.clock {
            Clock::System => Utc::now(),
            Clock::Fixed(now) => now,
        }
    }

    /// Runs the structural rules. Status needs no check: [`super::Status`]
    /// cannot hold an unknown value.
    pub fn validate(&self, announcement: &MatchAnnouncement) -> Result<(), AnnouncementError> {
        if announcement.team_name.trim().is_empty() {
            return Err(AnnouncementError::EmptyTeamName);
        }

        if announcement.sport.is_empty() {
            return Err(AnnouncementError::EmptySport);
        }

        // "Today" is taken in the announcement's own zone, not the caller's.
        let today = announcement.location.timezone().today(self.now());
        if announcement.day < today {
            return Err(AnnouncementError::DayInPast);
        }

        let slot = &announcement.time_slot;
        if is_unset(&slot.start()) || is_unset(&slot.end()) {
            return Err(AnnouncementError::EmptyTimeSlot);
        }
        if slot.end() < slot.start() {
            return Err(AnnouncementError::InvalidTimeSlot);
        }

        if !announcement.location.is_complete() {
            return Err(AnnouncementError::IncompleteLocation);
        }

        if is_unset(&announcement.created_at) {
            return Err(AnnouncementError::MissingCreatedAt);
        }

        Ok(())
    }
}

/// The epoch stands in for a timestamp that was never filled in.
fn is_unset<Tz: chrono::TimeZone>(instant: &DateTime<Tz>) -> bool {
    instant.timestamp() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::{CategoryRange, Location, NewAnnouncement, TimeSlot};
    use crate::common::{Category, Sport};
    use chrono::{FixedOffset, NaiveDate};

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn validator() -> AnnouncementValidator {
        // 2025-06-10 00:30 in Buenos Aires, still 2025-06-10 03:30 UTC.
        AnnouncementValidator::at(at("2025-06-10T03:30:00Z").with_timezone(&Utc))
    }

    fn valid() -> MatchAnnouncement {
        MatchAnnouncement::new(NewAnnouncement {
            team_name: "Thunder Strikers".to_string(),
            sport: Sport::new("Paddle"),
            day: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            time_slot: TimeSlot::new(
                at("2025-06-10T18:00:00-03:00"),
                at("2025-06-10T20:00:00-03:00"),
            )
            .unwrap(),
            location: Location::new("Argentina", "Buenos Aires", "CABA"),
            admitted_categories: CategoryRange::greater_than(Category::L3),
            created_at: at("2025-06-10T00:30:00-03:00"),
        })
    }

    #[test]
    fn test_valid_announcement_passes() {
        assert_eq!(validator().validate(&valid()), Ok(()));
    }

    fn rejected_with(mutate: impl FnOnce(&mut MatchAnnouncement)) -> AnnouncementError {
        let mut announcement = valid();
        mutate(&mut announcement);
        validator().validate(&announcement).unwrap_err()
    }

    #[test]
    fn test_each_rule_reports_its_own_error() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap().fixed_offset();
        let evening = at("2025-06-10T20:00:00-03:00");

        assert_eq!(
            rejected_with(|a| a.team_name = "  ".to_string()),
            AnnouncementError::EmptyTeamName
        );
        assert_eq!(
            rejected_with(|a| a.sport = Sport::new("")),
            AnnouncementError::EmptySport
        );
        assert_eq!(
            rejected_with(|a| a.day = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()),
            AnnouncementError::DayInPast
        );
        assert_eq!(
            rejected_with(|a| a.time_slot = TimeSlot::new(epoch, evening).unwrap()),
            AnnouncementError::EmptyTimeSlot
        );
        assert_eq!(
            rejected_with(|a| a.location = Location::new("Argentina", "", "CABA")),
            AnnouncementError::IncompleteLocation
        );
        assert_eq!(
            rejected_with(|a| a.created_at = epoch),
            AnnouncementError::MissingCreatedAt
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut announcement = valid();
        announcement.team_name = String::new();
        announcement.sport = Sport::new("");
        announcement.location = Location::new("", "", "");

        assert_eq!(
            validator().validate(&announcement),
            Err(AnnouncementError::EmptyTeamName)
        );
    }

    #[test]
    fn test_today_is_taken_in_the_location_zone() {
        // 02:00 UTC on the 11th is still the 10th in Buenos Aires.
        let validator =
            AnnouncementValidator::at(at("2025-06-11T02:00:00Z").with_timezone(&Utc));
        assert_eq!(validator.validate(&valid()), Ok(()));

        let validator =
            AnnouncementValidator::at(at("2025-06-11T03:00:00Z").with_timezone(&Utc));
        assert_eq!(
            validator.validate(&valid()),
            Err(AnnouncementError::DayInPast)
        );
    }
}
