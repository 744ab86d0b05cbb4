use std::fmt;

use super::ResponseStatus;

/// Terminal result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The spot strategy was submitted.
    Updated,
    /// The service already uses the target provider.
    NoChangeNeeded,
    /// A rollout is in flight; redeliver later.
    DeferredActiveDeployment,
    /// The notification did not name both a cluster and a service.
    InvalidEvent,
    /// The control plane has no such service.
    NotFound,
    /// A control-plane or transport error.
    Failed(String),
}

impl ReconcileOutcome {
    /// Stable label used in logs and counters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::NoChangeNeeded => "no_change_needed",
            Self::DeferredActiveDeployment => "deferred_active_deployment",
            Self::InvalidEvent => "invalid_event",
            Self::NotFound => "not_found",
            Self::Failed(_) => "failed",
        }
    }

    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::Updated | Self::NoChangeNeeded => ResponseStatus::Ok,
            Self::DeferredActiveDeployment => ResponseStatus::Waiting,
            Self::InvalidEvent | Self::NotFound | Self::Failed(_) => ResponseStatus::Error,
        }
    }

    /// Whether redelivering the same notification later can succeed.
    ///
    /// InvalidEvent and NotFound are permanent for the notification at hand.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DeferredActiveDeployment | Self::Failed(_))
    }

    pub fn message(&self) -> String {
        match self {
            Self::Updated => "capacity provider strategy updated".to_string(),
            Self::NoChangeNeeded => "service already uses the target capacity provider".to_string(),
            Self::DeferredActiveDeployment => {
                "active deployment in progress; strategy change deferred".to_string()
            }
            Self::InvalidEvent => "event is missing cluster or service identity".to_string(),
            Self::NotFound => "service not found in cluster".to_string(),
            Self::Failed(reason) => format!("reconciliation failed: {reason}"),
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed({reason})"),
            other => f.write_str(other.label()),
        }
    }
}
