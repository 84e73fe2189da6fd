//! API response types for match announcements.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::{Page, PageInfo};

use super::{CategoryRange, Location, MatchAnnouncement, Status};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotResponse {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
}

/// Admitted categories as returned to clients. Only the fields the range
/// kind uses are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRangeResponse {
    #[serde(rename = "type")]
    pub range_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<i64>,
}

impl From<&CategoryRange> for CategoryRangeResponse {
    fn from(range: &CategoryRange) -> Self {
        Self {
            range_type: range.range_type().as_str().to_string(),
            categories: range.categories().iter().map(|c| i64::from(*c)).collect(),
            min_level: range.min_level().map(i64::from),
            max_level: range.max_level().map(i64::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementResponse {
    pub id: String,
    pub team_name: String,
    pub sport: String,
    pub day: NaiveDate,
    pub time_slot: TimeSlotResponse,
    pub location: Location,
    pub admitted_categories: CategoryRangeResponse,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
}

impl From<&MatchAnnouncement> for AnnouncementResponse {
    fn from(announcement: &MatchAnnouncement) -> Self {
        Self {
            id: announcement.id.to_string(),
            team_name: announcement.team_name.clone(),
            sport: announcement.sport.as_str().to_string(),
            day: announcement.day,
            time_slot: TimeSlotResponse {
                start_time: announcement.time_slot.start(),
                end_time: announcement.time_slot.end(),
            },
            location: announcement.location.clone(),
            admitted_categories: CategoryRangeResponse::from(&announcement.admitted_categories),
            status: announcement.status,
            created_at: announcement.created_at,
        }
    }
}

/// Body of the search endpoint: one page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedAnnouncementsResponse {
    pub data: Vec<AnnouncementResponse>,
    pub pagination: PageInfo,
}

impl From<&Page<MatchAnnouncement>> for PaginatedAnnouncementsResponse {
    fn from(page: &Page<MatchAnnouncement>) -> Self {
        Self {
            data: page.entities.iter().map(AnnouncementResponse::from).collect(),
            pagination: page.page,
        }
    }
}
