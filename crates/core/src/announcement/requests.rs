//! API request types for match announcements.
//!
//! Pure data types plus their conversion into domain values. No I/O.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Category, Sport};

use super::{
    AnnouncementQuery, CategoryRange, Location, LocationTimezone, MatchAnnouncement,
    NewAnnouncement, QueryParamError, RangeType, RequestError, Status, TimeSlot,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local wall-clock formats accepted besides RFC 3339.
const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Query-string parameters of the search endpoint.
///
/// List parameters are comma separated; blank items are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindAnnouncementsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sports: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<String>,
    #[serde(
        default,
        rename = "fromDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub from_date: Option<String>,
    #[serde(default, rename = "toDate", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl FindAnnouncementsParams {
    /// Parses every parameter, failing on the first malformed one.
    pub fn into_query(self) -> Result<AnnouncementQuery, QueryParamError> {
        let sports = split_list(self.sports.as_deref())
            .map(Sport::new)
            .collect();

        let categories = split_list(self.categories.as_deref())
            .map(|raw| -> Result<Category, QueryParamError> {
                let level: i64 = raw
                    .parse()
                    .map_err(|_| QueryParamError::CategoryFormat(raw.to_string()))?;
                Ok(Category::try_from(level)?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let statuses = split_list(self.statuses.as_deref())
            .map(|raw| raw.parse::<Status>().map_err(QueryParamError::from))
            .collect::<Result<Vec<_>, _>>()?;

        let location = match (
            self.country.unwrap_or_default(),
            self.province.unwrap_or_default(),
            self.locality.unwrap_or_default(),
        ) {
            (country, province, locality)
                if country.is_empty() && province.is_empty() && locality.is_empty() =>
            {
                None
            }
            (country, province, locality) => Some(Location::new(country, province, locality)),
        };

        Ok(AnnouncementQuery {
            sports,
            categories,
            statuses,
            from_date: parse_optional_date(self.from_date.as_deref())?,
            to_date: parse_optional_date(self.to_date.as_deref())?,
            location,
            limit: self.limit.unwrap_or(0),
            offset: self.offset.unwrap_or(0),
        })
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, QueryParamError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| QueryParamError::Date(raw.to_string())),
    }
}

/// Start and end of the match as sent by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotInput {
    pub start_time: String,
    pub end_time: String,
}

/// Admitted categories as sent by clients.
///
/// Bounds that the range kind does not use are ignored; a missing bound the
/// kind needs reads as level 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRangeInput {
    #[serde(rename = "type")]
    pub range_type: String,
    #[serde(default)]
    pub categories: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<i64>,
}

impl TryFrom<CategoryRangeInput> for CategoryRange {
    type Error = RequestError;

    fn try_from(input: CategoryRangeInput) -> Result<Self, Self::Error> {
        let range_type: RangeType = input.range_type.parse().map_err(|_| {
            RequestError::RangeType(input.range_type.clone())
        })?;
        let min = || Category::try_from(input.min_level.unwrap_or(0));
        let max = || Category::try_from(input.max_level.unwrap_or(0));

        let range = match range_type {
            RangeType::Specific => CategoryRange::specific(
                input
                    .categories
                    .iter()
                    .map(|level| Category::try_from(*level))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            RangeType::GreaterThan => CategoryRange::greater_than(min()?),
            RangeType::LessThan => CategoryRange::less_than(max()?),
            RangeType::Between => CategoryRange::between(min()?, max()?)?,
        };
        Ok(range)
    }
}

/// Request payload for publishing a match announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub team_name: String,
    pub sport: String,
    /// `YYYY-MM-DD`.
    pub day: String,
    pub time_slot: TimeSlotInput,
    pub location: Location,
    pub admitted_categories: CategoryRangeInput,
}

impl CreateAnnouncementRequest {
    /// Builds a pending announcement created at `now`.
    ///
    /// Times without an offset are read as wall-clock time at the location.
    /// The team name is trimmed the same way team names are on creation.
    /// Structural rules (empty names, past days) are left to
    /// [`super::AnnouncementValidator`].
    pub fn into_announcement(self, now: DateTime<Utc>) -> Result<MatchAnnouncement, RequestError> {
        let day = NaiveDate::parse_from_str(self.day.trim(), DATE_FORMAT)
            .map_err(|_| RequestError::Day(self.day.clone()))?;

        let timezone = self.location.timezone();
        let start = parse_datetime(&self.time_slot.start_time, timezone)
            .ok_or_else(|| RequestError::StartTime(self.time_slot.start_time.clone()))?;
        let end = parse_datetime(&self.time_slot.end_time, timezone)
            .ok_or_else(|| RequestError::EndTime(self.time_slot.end_time.clone()))?;
        let time_slot = TimeSlot::new(start, end)?;

        let admitted_categories = CategoryRange::try_from(self.admitted_categories)?;

        Ok(MatchAnnouncement::new(NewAnnouncement {
            team_name: self.team_name.trim().to_string(),
            sport: Sport::new(self.sport),
            day,
            time_slot,
            created_at: timezone.localize(now),
            location: self.location,
            admitted_categories,
        }))
    }
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` read in `timezone`.
fn parse_datetime(raw: &str, timezone: LocationTimezone) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(timezone.localize(instant.with_timezone(&Utc)));
    }

    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .and_then(|local| timezone.from_local(local))
}

/// Request payload for moving an announcement to another status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: Status,
}
