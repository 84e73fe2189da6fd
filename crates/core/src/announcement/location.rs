//! Where a match is played, and the timezone its timestamps are read in.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Zone every location currently resolves to.
pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";

/// Offset used when the named zone cannot be resolved (GMT-3).
const FALLBACK_OFFSET_SECONDS: i32 = -3 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub province: String,
    pub locality: String,
}

impl Location {
    pub fn new(
        country: impl Into<String>,
        province: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            province: province.into(),
            locality: locality.into(),
        }
    }

    /// Returns true if country, province and locality are all present.
    pub fn is_complete(&self) -> bool {
        [&self.country, &self.province, &self.locality]
            .iter()
            .all(|part| !part.trim().is_empty())
    }

    /// Timezone used to localize this location's timestamps.
    ///
    /// Every location maps to Buenos Aires for now; per-location zones can
    /// be introduced here without touching callers.
    pub fn timezone(&self) -> LocationTimezone {
        LocationTimezone::resolve(DEFAULT_TIMEZONE)
    }
}

/// A resolved IANA zone, or the fixed fallback offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationTimezone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl LocationTimezone {
    /// Resolves `name`, falling back to GMT-3 when it is not a known zone.
    pub fn resolve(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => LocationTimezone::Named(tz),
            Err(_) => LocationTimezone::Fixed(fallback_offset()),
        }
    }

    /// Offset in effect at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            LocationTimezone::Named(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
            LocationTimezone::Fixed(offset) => *offset,
        }
    }

    /// Expresses `instant` in this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }

    /// Reads a wall-clock time in this zone. Ambiguous times resolve to the
    /// earliest instant; times skipped by a transition yield `None`.
    pub fn from_local(&self, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            LocationTimezone::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            LocationTimezone::Fixed(offset) => offset.from_local_datetime(&local).earliest(),
        }
    }

    /// Local midnight of `date`.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        let midnight = date.and_time(NaiveTime::MIN);
        self.from_local(midnight)
            .unwrap_or_else(|| midnight.and_utc().fixed_offset())
    }

    /// Calendar day of `now` in this zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.localize(now).date_naive()
    }
}

fn fallback_offset() -> FixedOffset {
    FixedOffset::east_opt(FALLBACK_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}
