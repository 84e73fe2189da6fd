//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB items and domain types.
//! Instants are stored as unix seconds and read back in the location's
//! timezone.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, FixedOffset, TimeZone};
use ulid::Ulid;

use sportlink_core::announcement::{
    CategoryRange, Location, LocationTimezone, MatchAnnouncement, RangeType, Status, TimeSlot,
};
use sportlink_core::common::{Category, Sport};
use sportlink_core::storage::RepositoryError;
use sportlink_core::team::{name_from_id, Team};

use super::keys::{self, PARTITION_KEY, SORT_KEY};
use super::store::Item;

// ============================================================================
// Attribute names
// ============================================================================

pub const TEAM_NAME: &str = "TeamName";
pub const SPORT: &str = "Sport";
pub const DAY: &str = "Day";
pub const START_TIME: &str = "StartTime";
pub const END_TIME: &str = "EndTime";
pub const COUNTRY: &str = "Country";
pub const PROVINCE: &str = "Province";
pub const LOCALITY: &str = "Locality";
pub const RANGE_TYPE: &str = "RangeType";
pub const CATEGORIES: &str = "Categories";
pub const MIN_LEVEL: &str = "MinLevel";
pub const MAX_LEVEL: &str = "MaxLevel";
pub const STATUS: &str = "Status";
pub const CREATED_AT: &str = "CreatedAt";
pub const EXPIRES_AT: &str = "ExpiresAt";
pub const CATEGORY: &str = "Category";

// ============================================================================
// Announcement conversions
// ============================================================================

/// Convert a MatchAnnouncement to DynamoDB item.
///
/// Bounds the range kind does not use are written as level 0.
pub fn announcement_to_item(announcement: &MatchAnnouncement) -> Result<Item, RepositoryError> {
    if announcement.id.is_nil() {
        return Err(RepositoryError::InvalidData(
            "ID could not be empty".to_string(),
        ));
    }

    let range = &announcement.admitted_categories;
    let timezone = announcement.location.timezone();
    let mut item = HashMap::new();

    // Keys
    item.insert(
        PARTITION_KEY.to_string(),
        AttributeValue::S(keys::ANNOUNCEMENT_ENTITY.to_string()),
    );
    item.insert(
        SORT_KEY.to_string(),
        AttributeValue::S(keys::announcement_sk(announcement.id)),
    );

    // Data
    item.insert(
        TEAM_NAME.to_string(),
        AttributeValue::S(announcement.team_name.clone()),
    );
    item.insert(
        SPORT.to_string(),
        AttributeValue::S(announcement.sport.as_str().to_string()),
    );
    item.insert(
        DAY.to_string(),
        timestamp(&timezone.start_of_day(announcement.day)),
    );
    item.insert(
        START_TIME.to_string(),
        timestamp(&announcement.time_slot.start()),
    );
    item.insert(
        END_TIME.to_string(),
        timestamp(&announcement.time_slot.end()),
    );
    item.insert(
        COUNTRY.to_string(),
        AttributeValue::S(announcement.location.country.clone()),
    );
    item.insert(
        PROVINCE.to_string(),
        AttributeValue::S(announcement.location.province.clone()),
    );
    item.insert(
        LOCALITY.to_string(),
        AttributeValue::S(announcement.location.locality.clone()),
    );
    item.insert(
        RANGE_TYPE.to_string(),
        AttributeValue::S(range.range_type().as_str().to_string()),
    );
    item.insert(
        CATEGORIES.to_string(),
        AttributeValue::L(range.categories().iter().map(|c| level(*c)).collect()),
    );
    item.insert(
        MIN_LEVEL.to_string(),
        level(range.min_level().unwrap_or(Category::Unranked)),
    );
    item.insert(
        MAX_LEVEL.to_string(),
        level(range.max_level().unwrap_or(Category::Unranked)),
    );
    item.insert(
        STATUS.to_string(),
        AttributeValue::S(announcement.status.as_str().to_string()),
    );
    item.insert(
        CREATED_AT.to_string(),
        timestamp(&announcement.created_at),
    );
    item.insert(
        EXPIRES_AT.to_string(),
        timestamp(&announcement.expires_at()),
    );

    Ok(item)
}

/// Convert a DynamoDB item to MatchAnnouncement.
pub fn item_to_announcement(item: &Item) -> Result<MatchAnnouncement, RepositoryError> {
    let id = get_string(item, SORT_KEY)?;
    let id = Ulid::from_string(&id)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid ULID {}: {}", id, e)))?;

    let location = Location::new(
        get_string(item, COUNTRY)?,
        get_string(item, PROVINCE)?,
        get_string(item, LOCALITY)?,
    );
    let timezone = location.timezone();

    let time_slot = TimeSlot::new(
        get_datetime(item, START_TIME, timezone)?,
        get_datetime(item, END_TIME, timezone)?,
    )
    .map_err(|e| RepositoryError::InvalidData(format!("Invalid time slot: {}", e)))?;

    let status = get_string(item, STATUS)?
        .parse::<Status>()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    Ok(MatchAnnouncement {
        id,
        team_name: get_string(item, TEAM_NAME)?,
        sport: Sport::new(get_string(item, SPORT)?),
        day: get_datetime(item, DAY, timezone)?.date_naive(),
        time_slot,
        admitted_categories: item_to_category_range(item)?,
        status,
        created_at: get_datetime(item, CREATED_AT, timezone)?,
        location,
    })
}

/// Read the range kind and pick the fields it uses.
fn item_to_category_range(item: &Item) -> Result<CategoryRange, RepositoryError> {
    let range_type = get_string(item, RANGE_TYPE)?
        .parse::<RangeType>()
        .map_err(RepositoryError::InvalidData)?;

    match range_type {
        RangeType::Specific => {
            let categories = match item.get(CATEGORIES) {
                None => Vec::new(),
                Some(value) => value
                    .as_l()
                    .map_err(|_| invalid_field(CATEGORIES))?
                    .iter()
                    .map(|value| {
                        value
                            .as_n()
                            .map_err(|_| invalid_field(CATEGORIES))
                            .and_then(|raw| parse_category(raw, CATEGORIES))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            };
            Ok(CategoryRange::specific(categories))
        }
        RangeType::GreaterThan => Ok(CategoryRange::greater_than(get_category(item, MIN_LEVEL)?)),
        RangeType::LessThan => Ok(CategoryRange::less_than(get_category(item, MAX_LEVEL)?)),
        RangeType::Between => CategoryRange::between(
            get_category(item, MIN_LEVEL)?,
            get_category(item, MAX_LEVEL)?,
        )
        .map_err(|e| RepositoryError::InvalidData(e.to_string())),
    }
}

// ============================================================================
// Team conversions
// ============================================================================

/// Convert a Team to DynamoDB item.
pub fn team_to_item(team: &Team) -> Result<Item, RepositoryError> {
    if team.id.is_empty() {
        return Err(RepositoryError::InvalidData(
            "ID could not be empty".to_string(),
        ));
    }

    let mut item = HashMap::new();
    item.insert(
        PARTITION_KEY.to_string(),
        AttributeValue::S(keys::TEAM_ENTITY.to_string()),
    );
    item.insert(SORT_KEY.to_string(), AttributeValue::S(team.id.clone()));
    item.insert(CATEGORY.to_string(), level(team.category));
    item.insert(
        SPORT.to_string(),
        AttributeValue::S(team.sport.as_str().to_string()),
    );

    Ok(item)
}

/// Convert a DynamoDB item to Team. The name is recovered from the id.
pub fn item_to_team(item: &Item) -> Result<Team, RepositoryError> {
    let id = get_string(item, SORT_KEY)?;
    Ok(Team {
        name: name_from_id(&id).to_string(),
        sport: Sport::new(get_string(item, SPORT)?),
        category: get_category(item, CATEGORY)?,
        id,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Numeric attribute holding unix seconds.
pub fn timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> AttributeValue {
    AttributeValue::N(instant.timestamp().to_string())
}

/// Numeric attribute holding a category level.
pub fn level(category: Category) -> AttributeValue {
    AttributeValue::N(i64::from(category).to_string())
}

fn invalid_field(key: &str) -> RepositoryError {
    RepositoryError::InvalidData(format!("Missing or invalid field: {}", key))
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| invalid_field(key))
}

/// Get a required integer attribute.
fn get_i64(item: &Item, key: &str) -> Result<i64, RepositoryError> {
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| invalid_field(key))?;
    raw.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}

/// Get a required category attribute.
fn get_category(item: &Item, key: &str) -> Result<Category, RepositoryError> {
    let raw = get_i64(item, key)?;
    Category::try_from(raw).map_err(|e| RepositoryError::InvalidData(format!("{}: {}", key, e)))
}

fn parse_category(raw: &str, key: &str) -> Result<Category, RepositoryError> {
    let value: i64 = raw
        .parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))?;
    Category::try_from(value).map_err(|e| RepositoryError::InvalidData(format!("{}: {}", key, e)))
}

/// Get a required instant attribute, expressed in `timezone`.
fn get_datetime(
    item: &Item,
    key: &str,
    timezone: LocationTimezone,
) -> Result<DateTime<FixedOffset>, RepositoryError> {
    let seconds = get_i64(item, key)?;
    DateTime::from_timestamp(seconds, 0)
        .map(|instant| timezone.localize(instant))
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid timestamp {}: {}", key, seconds)))
}
