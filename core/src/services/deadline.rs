//! Time bounds for store calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::{DomainResult, TokenError};

/// Runs a store call, failing with `TokenError::StoreTimeout` if it does
/// not finish within `limit`. The inner future is dropped on timeout.
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &'static str, call: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, limit_ms = limit.as_millis() as u64, "Store call timed out");
            Err(TokenError::StoreTimeout {
                operation: operation.to_string(),
            }
            .into())
        }
    }
}
