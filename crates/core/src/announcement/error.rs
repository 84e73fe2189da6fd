use thiserror::Error;

use crate::common::CategoryError;

use super::Status;

/// Errors raised by the announcement value objects and the creation rules.
///
/// Validation stops at the first violated rule, so each variant names exactly
/// one rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnouncementError {
    #[error("team name cannot be empty")]
    EmptyTeamName,
    #[error("sport cannot be empty")]
    EmptySport,
    #[error("day cannot be in the past")]
    DayInPast,
    #[error("time slot cannot be empty")]
    EmptyTimeSlot,
    #[error("end time cannot be before start time")]
    InvalidTimeSlot,
    #[error("location must have country, province and locality")]
    IncompleteLocation,
    #[error("created at cannot be empty")]
    MissingCreatedAt,
    #[error("min category cannot be greater than max category")]
    InvalidCategoryBounds,
    #[error("cannot change status from {from} to {to}")]
    InvalidTransition { from: Status, to: Status },
}

/// Errors that can occur when parsing a status from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("invalid status: {0}")]
    Invalid(String),
}

/// Errors raised while turning query-string parameters into a search.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryParamError {
    #[error("invalid category format: {0}")]
    CategoryFormat(String),
    #[error("invalid category value: {0}")]
    Category(#[from] CategoryError),
    #[error("invalid status value: {0}")]
    Status(#[from] StatusError),
    #[error("invalid date format, use YYYY-MM-DD: {0}")]
    Date(String),
}

/// Errors raised while turning a creation payload into an announcement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid day format: {0}")]
    Day(String),
    #[error("invalid start time format: unable to parse datetime: {0}")]
    StartTime(String),
    #[error("invalid end time format: unable to parse datetime: {0}")]
    EndTime(String),
    #[error("invalid category range type: {0}")]
    RangeType(String),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Announcement(#[from] AnnouncementError),
}
