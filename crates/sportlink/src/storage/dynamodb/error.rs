//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `sportlink_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use sportlink_core::storage::RepositoryError;

/// Service-side failures shared by every operation.
enum ServiceFailure {
    TableMissing,
    Throttled,
    RequestLimit,
    Internal,
}

impl From<ServiceFailure> for RepositoryError {
    fn from(failure: ServiceFailure) -> Self {
        let message = match failure {
            ServiceFailure::TableMissing => "Table not found",
            ServiceFailure::Throttled => "Throughput exceeded, please retry",
            ServiceFailure::RequestLimit => "Request limit exceeded, please retry",
            ServiceFailure::Internal => "DynamoDB internal server error",
        };
        RepositoryError::QueryFailed(message.to_string())
    }
}

/// Map a GetItem SDK error to RepositoryError.
///
/// A missing table on a point read surfaces as `NotFound` for the item.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => RepositoryError::NotFound {
            entity_type,
            id: id.into(),
        },
        GetItemError::ProvisionedThroughputExceededException(_) => ServiceFailure::Throttled.into(),
        GetItemError::RequestLimitExceeded(_) => ServiceFailure::RequestLimit.into(),
        GetItemError::InternalServerError(_) => ServiceFailure::Internal.into(),
        other => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", other)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => ServiceFailure::TableMissing.into(),
        QueryError::ProvisionedThroughputExceededException(_) => ServiceFailure::Throttled.into(),
        QueryError::RequestLimitExceeded(_) => ServiceFailure::RequestLimit.into(),
        QueryError::InternalServerError(_) => ServiceFailure::Internal.into(),
        other => RepositoryError::QueryFailed(format!("Query failed: {:?}", other)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(failure) = transport_failure(&err) {
        return failure;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::QueryFailed(format!(
            "Conditional write rejected for {} {}",
            entity_type,
            id.into()
        )),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::ResourceNotFoundException(_) => ServiceFailure::TableMissing.into(),
        PutItemError::ProvisionedThroughputExceededException(_) => ServiceFailure::Throttled.into(),
        PutItemError::RequestLimitExceeded(_) => ServiceFailure::RequestLimit.into(),
        PutItemError::InternalServerError(_) => ServiceFailure::Internal.into(),
        other => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", other)),
    }
}

/// Requests that never reached the service are connection problems.
fn transport_failure<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    let reason = match err {
        SdkError::TimeoutError(_) => "request timed out".to_string(),
        SdkError::DispatchFailure(failure) => format!("dispatch failure: {failure:?}"),
        _ => return None,
    };
    Some(RepositoryError::ConnectionFailed(reason))
}
