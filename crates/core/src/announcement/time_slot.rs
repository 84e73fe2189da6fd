use chrono::{DateTime, FixedOffset, TimeDelta};

use super::AnnouncementError;

/// Start and end instants of a match.
///
/// A slot whose end equals its start is accepted; see
/// `test_zero_length_slot_is_accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl TimeSlot {
    /// Fails when `end` is before `start`.
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, AnnouncementError> {
        if end < start {
            return Err(AnnouncementError::InvalidTimeSlot);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Half-open containment: `[start, end)`.
    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_end_before_start_fails() {
        let result = TimeSlot::new(at("2025-06-10T20:00:00-03:00"), at("2025-06-10T18:00:00-03:00"));
        assert_eq!(result, Err(AnnouncementError::InvalidTimeSlot));
    }

    #[test]
    fn test_zero_length_slot_is_accepted() {
        // Current behaviour: equal bounds are allowed, producing an empty slot.
        let instant = at("2025-06-10T18:00:00-03:00");
        let slot = TimeSlot::new(instant, instant).unwrap();

        assert_eq!(slot.duration(), TimeDelta::zero());
        assert!(!slot.contains(instant));
    }

    #[test]
    fn test_duration() {
        let slot = TimeSlot::new(at("2025-06-10T18:00:00-03:00"), at("2025-06-10T20:30:00-03:00")).unwrap();
        assert_eq!(slot.duration(), TimeDelta::minutes(150));
    }

    #[test]
    fn test_contains_is_half_open() {
        let slot = TimeSlot::new(at("2025-06-10T18:00:00-03:00"), at("2025-06-10T20:00:00-03:00")).unwrap();

        assert!(slot.contains(at("2025-06-10T18:00:00-03:00")));
        assert!(slot.contains(at("2025-06-10T19:59:59-03:00")));
        assert!(!slot.contains(at("2025-06-10T20:00:00-03:00")));
        assert!(!slot.contains(at("2025-06-10T17:59:59-03:00")));
    }

    #[test]
    fn test_contains_compares_instants_across_offsets() {
        let slot = TimeSlot::new(at("2025-06-10T18:00:00-03:00"), at("2025-06-10T20:00:00-03:00")).unwrap();
        assert!(slot.contains(at("2025-06-10T21:30:00+00:00")));
    }
}
