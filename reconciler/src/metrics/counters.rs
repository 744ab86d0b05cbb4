use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use corelib::ReconcileOutcome;

/// Per-outcome counters shared by every reconciliation of a process.
#[derive(Clone, Default)]
pub struct OutcomeCounters {
    pub updated: Arc<AtomicU64>,
    pub no_change_needed: Arc<AtomicU64>,
    pub deferred_active_deployment: Arc<AtomicU64>,
    pub invalid_event: Arc<AtomicU64>,
    pub not_found: Arc<AtomicU64>,
    pub failed: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub updated: u64,
    pub no_change_needed: u64,
    pub deferred_active_deployment: u64,
    pub invalid_event: u64,
    pub not_found: u64,
    pub failed: u64,
}

impl CountersSnapshot {
    pub fn total(&self) -> u64 {
        self.updated
            + self.no_change_needed
            + self.deferred_active_deployment
            + self.invalid_event
            + self.not_found
            + self.failed
    }
}

impl OutcomeCounters {
    pub fn record(&self, outcome: &ReconcileOutcome) {
        let counter = match outcome {
            ReconcileOutcome::Updated => &self.updated,
            ReconcileOutcome::NoChangeNeeded => &self.no_change_needed,
            ReconcileOutcome::DeferredActiveDeployment => &self.deferred_active_deployment,
            ReconcileOutcome::InvalidEvent => &self.invalid_event,
            ReconcileOutcome::NotFound => &self.not_found,
            ReconcileOutcome::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            updated: self.updated.load(Ordering::Relaxed),
            no_change_needed: self.no_change_needed.load(Ordering::Relaxed),
            deferred_active_deployment: self.deferred_active_deployment.load(Ordering::Relaxed),
            invalid_event: self.invalid_event.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
