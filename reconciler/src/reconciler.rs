//! The reconciliation ladder.
//!
//! For one notification:
//!   1. Normalize it into a service identity (invalid events stop here, no calls made).
//!   2. Ask the deployment gate; an in-flight rollout defers the change.
//!   3. Fetch a fresh snapshot of the service's strategy.
//!   4. Stop if the strategy already names the target provider.
//!   5. Otherwise submit the single-entry target strategy.
//!
//! Steps 2–5 run under the identity's lock. Nothing is retried here: the
//! outcome tells the caller whether redelivery makes sense.

use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, error, info, warn};

use adapters::{ControlPlane, RolloutTracker};
use common::{TraceId, annotate_span, root_span};
use corelib::{ReconcileOutcome, ResponseStatus, ServiceIdentity};

use crate::config::ReconcilerConfig;
use crate::error::ReconcileError;
use crate::gate::DeploymentGate;
use crate::locks::IdentityLocks;
use crate::metrics::counters::OutcomeCounters;
use crate::mutator::StrategyMutator;
use crate::normalizer::normalize;
use crate::state_reader::ClusterStateReader;

pub struct Reconciler {
    gate: DeploymentGate,
    reader: ClusterStateReader,
    mutator: StrategyMutator,
    locks: IdentityLocks,
    counters: OutcomeCounters,
}

impl Reconciler {
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        tracker: Arc<dyn RolloutTracker>,
        cfg: &ReconcilerConfig,
    ) -> Self {
        Self {
            gate: DeploymentGate::new(tracker, cfg.gate_policy, cfg.call_timeout),
            reader: ClusterStateReader::new(Arc::clone(&control_plane), cfg.call_timeout),
            mutator: StrategyMutator::new(
                control_plane,
                cfg.target_provider.clone(),
                cfg.force_new_deployment,
                cfg.call_timeout,
            ),
            locks: IdentityLocks::new(),
            counters: OutcomeCounters::default(),
        }
    }

    pub fn counters(&self) -> &OutcomeCounters {
        &self.counters
    }

    pub fn target_provider(&self) -> &str {
        self.mutator.target_provider()
    }

    /// Reconcile one raw notification. Never fails: every fault is an outcome.
    pub async fn reconcile(&self, event: &Value) -> ReconcileOutcome {
        let trace_id = TraceId::new();
        let span = root_span("reconcile", &trace_id);

        async {
            let outcome = match normalize(event) {
                Ok(identity) => {
                    annotate_span(&identity.cluster_name, &identity.service_name);
                    self.reconcile_identity(&identity).await
                }
                Err(invalid) => {
                    warn!(error = %invalid, "rejecting event");
                    ReconcileOutcome::InvalidEvent
                }
            };

            self.record(&outcome);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Steps 2–5 for an already-normalized identity.
    pub async fn reconcile_identity(&self, identity: &ServiceIdentity) -> ReconcileOutcome {
        let _guard = self.locks.lock(identity).await;

        if self.gate.is_deployment_active(identity).await {
            return ReconcileOutcome::DeferredActiveDeployment;
        }

        let snapshot = match self.reader.fetch_snapshot(identity).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return ReconcileOutcome::NotFound,
            Err(e) => return failed(e),
        };

        if snapshot.uses_provider(self.mutator.target_provider()) {
            return ReconcileOutcome::NoChangeNeeded;
        }

        match self.mutator.apply_spot_strategy(identity).await {
            Ok(()) => ReconcileOutcome::Updated,
            Err(e) => failed(e),
        }
    }

    fn record(&self, outcome: &ReconcileOutcome) {
        self.counters.record(outcome);

        match outcome.status() {
            ResponseStatus::Ok | ResponseStatus::Waiting => info!(
                outcome = outcome.label(),
                retryable = outcome.is_retryable(),
                "reconciliation finished"
            ),
            ResponseStatus::Error => match outcome {
                ReconcileOutcome::Failed(reason) => error!(
                    outcome = outcome.label(),
                    retryable = true,
                    %reason,
                    "reconciliation failed"
                ),
                _ => warn!(
                    outcome = outcome.label(),
                    retryable = false,
                    "reconciliation rejected"
                ),
            },
        }
    }
}

fn failed(e: ReconcileError) -> ReconcileOutcome {
    if e.is_throttling() {
        warn!(error = %e, "control plane is throttling requests");
    }
    ReconcileOutcome::Failed(e.reason())
}
