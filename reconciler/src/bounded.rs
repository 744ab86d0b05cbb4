use std::future::Future;
use std::time::Duration;

use adapters::AdapterError;
use common::warn_if_slow;

use crate::error::ReconcileError;

/// Run one external call under `limit`.
///
/// Calls taking more than half the limit are reported as slow; calls that
/// exceed it are abandoned and reported as [`ReconcileError::Timeout`].
pub async fn bounded<T, F>(call: &'static str, limit: Duration, fut: F) -> Result<T, ReconcileError>
where
    F: Future<Output = Result<T, AdapterError>>,
{
    match tokio::time::timeout(limit, warn_if_slow(call, limit / 2, fut)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(ReconcileError::Adapter { call, source }),
        Err(_) => Err(ReconcileError::Timeout {
            call,
            timeout: limit,
        }),
    }
}
