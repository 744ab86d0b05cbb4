//! Fans a batch of notifications out to independent reconciliations.
//!
//! Guarantees:
//! - one outcome per input item, in input order
//! - a failing or panicking item affects only its own outcome
//! - at most `max_concurrency` items in flight; items for the same service
//!   are additionally serialized by the reconciler's identity locks

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{Instrument, error, info, info_span};

use corelib::{ReconcileOutcome, ResponseStatus};

use crate::reconciler::Reconciler;

pub struct BatchDispatcher {
    reconciler: Arc<Reconciler>,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl BatchDispatcher {
    pub fn new(reconciler: Arc<Reconciler>, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);

        Self {
            reconciler,
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn dispatch_all(&self, events: Vec<Value>) -> Vec<ReconcileOutcome> {
        let total = events.len();

        let handles = events.into_iter().enumerate().map(|(index, event)| {
            let reconciler = Arc::clone(&self.reconciler);
            let permits = Arc::clone(&self.permits);

            tokio::spawn(
                async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return ReconcileOutcome::Failed("dispatcher closed".to_string());
                    };
                    reconciler.reconcile(&event).await
                }
                .instrument(info_span!("batch_item", index, total)),
            )
        });

        let joined = join_all(handles).await;

        let outcomes: Vec<ReconcileOutcome> = joined
            .into_iter()
            .enumerate()
            .map(|(index, res)| match res {
                Ok(outcome) => outcome,
                Err(e) => {
                    let kind = if e.is_panic() { "panicked" } else { "was cancelled" };
                    error!(index, error = %e, "batch item task {kind}");

                    let outcome = ReconcileOutcome::Failed(format!("item task {kind}"));
                    self.reconciler.counters().record(&outcome);
                    outcome
                }
            })
            .collect();

        let ok = outcomes
            .iter()
            .filter(|o| o.status() == ResponseStatus::Ok)
            .count();
        let waiting = outcomes
            .iter()
            .filter(|o| o.status() == ResponseStatus::Waiting)
            .count();

        info!(
            items = total,
            ok,
            waiting,
            errors = total - ok - waiting,
            "batch dispatched"
        );

        outcomes
    }
}
