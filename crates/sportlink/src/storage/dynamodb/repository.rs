//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `sportlink_core::storage` on top of
//! an [`ItemStore`]. A search runs in two phases over the same expression:
//! a count pass that drains the whole continuation chain to get the exact
//! total, then a fetch pass that reads in batches until the requested page
//! is covered.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

use sportlink_core::announcement::{
    AnnouncementQuery, LocationField, LocationTimezone, MatchAnnouncement, PostFilter,
    DEFAULT_TIMEZONE,
};
use sportlink_core::storage::{
    calculate_page_info, paginate, AnnouncementRepository, Page, RepositoryError, Result,
    StorePhase, TeamRepository,
};
use sportlink_core::team::{Team, TeamQuery};

use super::conversions::{
    announcement_to_item, item_to_announcement, item_to_team, level, team_to_item, timestamp,
    CATEGORY, COUNTRY, DAY, LOCALITY, PROVINCE, SPORT, STATUS,
};
use super::expression::{QueryExpression, QueryFilterBuilder};
use super::keys;
use super::store::{item_key, Item, ItemStore, PageOptions};

/// Items requested per round trip during the fetch pass.
pub const DEFAULT_FETCH_BATCH_SIZE: usize = 100;

/// Repository over the single SportLink table.
pub struct DynamoDbRepository<S> {
    store: S,
    fetch_batch_size: usize,
}

impl<S: ItemStore> DynamoDbRepository<S> {
    /// Creates a new repository on top of `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            fetch_batch_size: DEFAULT_FETCH_BATCH_SIZE,
        }
    }

    /// Sets how many items the fetch pass asks for per round trip.
    pub fn with_fetch_batch_size(mut self, fetch_batch_size: usize) -> Self {
        self.fetch_batch_size = fetch_batch_size.max(1);
        self
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Counts every match, following the continuation chain to its end.
    async fn count(
        &self,
        expression: &QueryExpression,
        post_filter: PostFilter<'_>,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let mut total = 0;
        let mut pages = 0;
        let mut start_key = None;

        loop {
            if cancel.is_cancelled() {
                return Err(RepositoryError::Cancelled {
                    phase: StorePhase::Count,
                });
            }

            let options = PageOptions {
                limit: None,
                exclusive_start_key: start_key.take(),
                count_only: post_filter.is_empty(),
            };
            let page = self
                .store
                .query_page(expression, options)
                .await
                .map_err(|e| e.in_phase(StorePhase::Count))?;
            pages += 1;

            total += if post_filter.is_empty() {
                page.count
            } else {
                decode_matching(&page.items, post_filter)
                    .map_err(|e| e.in_phase(StorePhase::Count))?
                    .len()
            };

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        tracing::trace!(total, pages, "Counted match announcements");
        Ok(total)
    }

    /// Reads matches in order until `offset + limit` of them are collected
    /// or the chain is exhausted.
    async fn fetch(
        &self,
        expression: &QueryExpression,
        query: &AnnouncementQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<MatchAnnouncement>> {
        let post_filter = query.post_filter();
        let unbounded = query.limit == 0 && query.is_unfiltered();

        let unfiltered;
        let (expression, batch) = if unbounded {
            unfiltered = expression.without_filter();
            (&unfiltered, None)
        } else {
            (expression, Some(self.fetch_batch_size))
        };
        let wanted = (query.limit > 0).then(|| query.offset.saturating_add(query.limit));

        let mut matches = Vec::new();
        let mut start_key = None;

        loop {
            if cancel.is_cancelled() {
                return Err(RepositoryError::Cancelled {
                    phase: StorePhase::Fetch,
                });
            }

            let options = PageOptions {
                limit: batch,
                exclusive_start_key: start_key.take(),
                count_only: false,
            };
            let page = self
                .store
                .query_page(expression, options)
                .await
                .map_err(|e| e.in_phase(StorePhase::Fetch))?;

            matches.extend(
                decode_matching(&page.items, post_filter)
                    .map_err(|e| e.in_phase(StorePhase::Fetch))?,
            );

            if wanted.is_some_and(|wanted| matches.len() >= wanted) {
                break;
            }
            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        Ok(matches)
    }
}

/// Builds the store-side expression for an announcement search.
///
/// Day bounds are compared as the start of the day in the query location's
/// timezone, which is how days are stored.
pub fn announcement_expression(query: &AnnouncementQuery) -> QueryExpression {
    let timezone = query
        .location
        .as_ref()
        .map(|location| location.timezone())
        .unwrap_or_else(|| LocationTimezone::resolve(DEFAULT_TIMEZONE));

    let sports = query
        .sports
        .iter()
        .map(|sport| AttributeValue::S(sport.as_str().to_string()))
        .collect();
    let statuses = query
        .statuses
        .iter()
        .map(|status| AttributeValue::S(status.as_str().to_string()))
        .collect();

    let mut builder = QueryFilterBuilder::partition(keys::ANNOUNCEMENT_ENTITY)
        .is_in(SPORT, sports)
        .is_in(STATUS, statuses);

    if let Some(from) = query.from_date {
        builder = builder.at_least(DAY, timestamp(&timezone.start_of_day(from)));
    }
    if let Some(to) = query.to_date {
        builder = builder.at_most(DAY, timestamp(&timezone.start_of_day(to)));
    }
    for (field, value) in query.location_filters() {
        let attribute = match field {
            LocationField::Country => COUNTRY,
            LocationField::Province => PROVINCE,
            LocationField::Locality => LOCALITY,
        };
        builder = builder.equals(attribute, AttributeValue::S(value.to_string()));
    }

    builder.build()
}

fn decode_matching(items: &[Item], post_filter: PostFilter<'_>) -> Result<Vec<MatchAnnouncement>> {
    let mut matches = Vec::with_capacity(items.len());
    for item in items {
        let announcement = item_to_announcement(item)?;
        if post_filter.matches(&announcement) {
            matches.push(announcement);
        }
    }
    Ok(matches)
}

// ============================================================================
// AnnouncementRepository implementation
// ============================================================================

#[async_trait]
impl<S: ItemStore> AnnouncementRepository for DynamoDbRepository<S> {
    async fn save(&self, announcement: &MatchAnnouncement) -> Result<()> {
        let item = announcement_to_item(announcement).map_err(|e| e.in_phase(StorePhase::Save))?;
        self.store
            .put_item(item)
            .await
            .map_err(|e| e.in_phase(StorePhase::Save))?;

        tracing::debug!(announcement_id = %announcement.id, "Saved match announcement");
        Ok(())
    }

    async fn get(&self, id: Ulid) -> Result<Option<MatchAnnouncement>> {
        let key = item_key(keys::ANNOUNCEMENT_ENTITY, &keys::announcement_sk(id));
        let item = self
            .store
            .get_item(key)
            .await
            .map_err(|e| e.in_phase(StorePhase::Lookup))?;

        item.map(|item| item_to_announcement(&item))
            .transpose()
            .map_err(|e| e.in_phase(StorePhase::Lookup))
    }

    async fn find(
        &self,
        query: &AnnouncementQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<MatchAnnouncement>> {
        let expression = announcement_expression(query);

        let total = self.count(&expression, query.post_filter(), cancel).await?;
        if total == 0 {
            return Ok(Page {
                entities: Vec::new(),
                page: calculate_page_info(query.limit, query.offset, 0),
            });
        }

        let matches = self.fetch(&expression, query, cancel).await?;
        let entities = paginate(matches, query.limit, query.offset);
        tracing::debug!(
            total,
            returned = entities.len(),
            limit = query.limit,
            offset = query.offset,
            "Found match announcements"
        );

        Ok(Page {
            entities,
            page: calculate_page_info(query.limit, query.offset, total),
        })
    }
}

// ============================================================================
// TeamRepository implementation
// ============================================================================

#[async_trait]
impl<S: ItemStore> TeamRepository for DynamoDbRepository<S> {
    async fn save_team(&self, team: &Team) -> Result<()> {
        let item = team_to_item(team).map_err(|e| e.in_phase(StorePhase::Save))?;
        self.store
            .put_item(item)
            .await
            .map_err(|e| e.in_phase(StorePhase::Save))?;

        tracing::debug!(team_id = %team.id, "Saved team");
        Ok(())
    }

    async fn find_teams(&self, query: &TeamQuery) -> Result<Vec<Team>> {
        let only_sport = match query.sports.as_slice() {
            [sport] => Some(sport),
            _ => None,
        };
        let prefix = keys::team_sk_prefix(query.name.as_deref(), only_sport);

        let expression = QueryFilterBuilder::partition(keys::TEAM_ENTITY)
            .sort_key_begins_with(prefix)
            .is_in(
                SPORT,
                query
                    .sports
                    .iter()
                    .map(|sport| AttributeValue::S(sport.as_str().to_string()))
                    .collect(),
            )
            .is_in(
                CATEGORY,
                query.categories.iter().copied().map(level).collect(),
            )
            .build();

        let mut teams = Vec::new();
        let mut start_key = None;
        loop {
            let options = PageOptions {
                exclusive_start_key: start_key.take(),
                ..Default::default()
            };
            let page = self
                .store
                .query_page(&expression, options)
                .await
                .map_err(|e| e.in_phase(StorePhase::Lookup))?;

            for item in &page.items {
                let team = item_to_team(item).map_err(|e| e.in_phase(StorePhase::Lookup))?;
                if query.matches_name(&team) {
                    teams.push(team);
                }
            }

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        Ok(teams)
    }
}
