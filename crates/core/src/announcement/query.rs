use chrono::NaiveDate;

use crate::common::{Category, Sport};

use super::{Location, MatchAnnouncement, Status};

/// Search criteria for match announcements.
///
/// All criteria are optional and combine with AND. `limit == 0` means no
/// limit and `offset == 0` means no offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementQuery {
    pub sports: Vec<Sport>,
    pub categories: Vec<Category>,
    pub statuses: Vec<Status>,
    /// Inclusive lower bound on the match day.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on the match day.
    pub to_date: Option<NaiveDate>,
    /// Empty components are not filtered on.
    pub location: Option<Location>,
    pub limit: usize,
    pub offset: usize,
}

impl AnnouncementQuery {
    /// Returns true if any criterion can be pushed down to the store.
    pub fn has_store_filters(&self) -> bool {
        !self.sports.is_empty()
            || !self.statuses.is_empty()
            || self.from_date.is_some()
            || self.to_date.is_some()
            || self
                .location
                .as_ref()
                .is_some_and(|location| location_components(location).next().is_some())
    }

    /// Returns true if any criterion has to be evaluated after fetching.
    pub fn has_post_filters(&self) -> bool {
        !self.post_filter().is_empty()
    }

    /// Returns true if the query has no criteria at all.
    pub fn is_unfiltered(&self) -> bool {
        !self.has_store_filters() && !self.has_post_filters()
    }

    /// The criteria the store cannot express.
    pub fn post_filter(&self) -> PostFilter<'_> {
        PostFilter {
            categories: &self.categories,
        }
    }

    /// Non-empty location components as `(field, value)` pairs.
    pub fn location_filters(&self) -> Vec<(LocationField, &str)> {
        self.location
            .as_ref()
            .map(|location| location_components(location).collect())
            .unwrap_or_default()
    }
}

/// Location attribute a query can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Country,
    Province,
    Locality,
}

fn location_components(location: &Location) -> impl Iterator<Item = (LocationField, &str)> {
    [
        (LocationField::Country, location.country.as_str()),
        (LocationField::Province, location.province.as_str()),
        (LocationField::Locality, location.locality.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
}

/// In-memory stage applied to fetched announcements before paging.
///
/// Category admission depends on the range kind of each stored item, which a
/// filter expression cannot interpret.
#[derive(Debug, Clone, Copy)]
pub struct PostFilter<'a> {
    categories: &'a [Category],
}

impl PostFilter<'_> {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// An announcement passes when its range admits at least one of the
    /// requested categories.
    pub fn matches(&self, announcement: &MatchAnnouncement) -> bool {
        self.categories.is_empty() || announcement.admitted_categories.admits_any(self.categories)
    }
}
