//! Application state with repository-based storage.
//!
//! The shared state handed to every request handler: repository trait
//! objects plus the announcement validator, built once at startup.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use tokio_util::sync::CancellationToken;

use sportlink_core::announcement::AnnouncementValidator;
use sportlink_core::storage::{AnnouncementRepository, TeamRepository};

use crate::config::Config;
use crate::storage::dynamodb::ItemStore;
use crate::storage::{DynamoDbRepository, DynamoDbStore, InMemoryTable};

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Match announcement repository.
    pub announcements: Arc<dyn AnnouncementRepository>,
    /// Team repository, used for the referential check on create.
    pub teams: Arc<dyn TeamRepository>,
    /// Validator run on every new announcement.
    pub validator: AnnouncementValidator,
    /// Cancelled when the server starts shutting down.
    shutdown: CancellationToken,
}

impl AppState {
    fn build<S: ItemStore + 'static>(repository: DynamoDbRepository<S>) -> Self {
        let repository = Arc::new(repository);
        Self {
            announcements: repository.clone(),
            teams: repository,
            validator: AnnouncementValidator::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates AppState backed by DynamoDB.
    ///
    /// Credentials come from the AWS SDK default chain.
    pub async fn dynamodb(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));
        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let client = Client::new(&loader.load().await);

        tracing::info!(
            table = %config.table_name,
            region = %config.aws_region,
            endpoint = ?config.aws_endpoint_url,
            "Using DynamoDB storage"
        );

        let store = DynamoDbStore::new(client, &config.table_name);
        Self::build(DynamoDbRepository::new(store).with_fetch_batch_size(config.fetch_batch_size))
    }

    /// Creates AppState backed by an in-memory table. Data is lost on exit.
    pub fn in_memory(config: &Config) -> Self {
        tracing::info!("Using in-memory storage");
        Self::build(
            DynamoDbRepository::new(InMemoryTable::new())
                .with_fetch_batch_size(config.fetch_batch_size),
        )
    }

    /// Replaces the validator, e.g. to pin the clock.
    pub fn with_validator(mut self, validator: AnnouncementValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Token for one request's store scans. Cancelled on shutdown, so
    /// in-flight searches stop at the next page instead of draining.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Signal in-flight requests to stop.
    pub fn signal_shutdown(&self) {
        self.shutdown.cancel();
    }
}
