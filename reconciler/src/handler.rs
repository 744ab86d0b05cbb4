use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use corelib::{BatchResponse, HandlerResponse, InboundPayload, InvocationResponse};

use crate::dispatcher::BatchDispatcher;
use crate::reconciler::Reconciler;

/// Entry point for one invocation: a single notification or a batch envelope.
pub struct InvocationHandler {
    reconciler: Arc<Reconciler>,
    dispatcher: BatchDispatcher,
}

impl InvocationHandler {
    pub fn new(reconciler: Arc<Reconciler>, batch_concurrency: usize) -> Self {
        Self {
            dispatcher: BatchDispatcher::new(Arc::clone(&reconciler), batch_concurrency),
            reconciler,
        }
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub async fn handle(&self, payload: Value) -> InvocationResponse {
        match InboundPayload::classify(payload) {
            InboundPayload::Single(event) => {
                let outcome = self.reconciler.reconcile(&event).await;
                InvocationResponse::Single(HandlerResponse::from(&outcome))
            }
            InboundPayload::Batch(envelope) => {
                info!(records = envelope.records.len(), "batch received");

                let events = envelope
                    .records
                    .iter()
                    .enumerate()
                    .map(|(index, record)| {
                        record.payload().unwrap_or_else(|e| {
                            warn!(
                                index,
                                message_id = ?record.message_id,
                                error = %e,
                                "unreadable record body"
                            );
                            Value::Null
                        })
                    })
                    .collect();

                let outcomes = self.dispatcher.dispatch_all(events).await;
                InvocationResponse::Batch(BatchResponse::from_outcomes(&outcomes))
            }
        }
    }
}
