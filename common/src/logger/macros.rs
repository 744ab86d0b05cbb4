use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for one reconciliation (a single event or one batch item).
///
/// `cluster` and `service` start empty and are filled in by [`annotate_span`]
/// once the event has been normalized.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        cluster = field::Empty,
        service = field::Empty
    )
}

/// Record the service identity on the current span.
pub fn annotate_span(cluster: &str, service: &str) {
    let span = Span::current();
    span.record("cluster", field::display(cluster));
    span.record("service", field::display(service));
}

pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn warn_if_slow_passes_through_output() {
        let out = warn_if_slow("noop", Duration::from_secs(1), async { 42 }).await;
        assert_eq!(out, 42);
    }
}
