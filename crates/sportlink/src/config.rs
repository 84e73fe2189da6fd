use std::{env, time::Duration};

use crate::storage::dynamodb::DEFAULT_FETCH_BATCH_SIZE;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding every entity (default: "SportLinkCore")
    pub table_name: String,
    /// AWS region (default: "us-west-2")
    pub aws_region: String,
    /// Endpoint override, e.g. a local DynamoDB (default: none)
    pub aws_endpoint_url: Option<String>,
    /// Items requested per round trip when fetching a page (default: 100)
    pub fetch_batch_size: usize,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "SportLinkCore")
    /// - `AWS_REGION` - AWS region (default: "us-west-2")
    /// - `AWS_ENDPOINT_URL` - Endpoint override (default: none)
    /// - `FETCH_BATCH_SIZE` - Fetch batch size (default: 100)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|_| "SportLinkCore".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            fetch_batch_size: env::var("FETCH_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_FETCH_BATCH_SIZE),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
