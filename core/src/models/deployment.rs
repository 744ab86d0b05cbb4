use std::fmt;

/// Status label reported by the rollout tracker for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeploymentStatus {
    Created,
    Queued,
    InProgress,
    Baking,
    Ready,
    Succeeded,
    Failed,
    Stopped,
    Other(String),
}

impl DeploymentStatus {
    /// Labels that mean a rollout is still being applied to the service.
    pub const IN_FLIGHT: [DeploymentStatus; 3] = [
        DeploymentStatus::Created,
        DeploymentStatus::Queued,
        DeploymentStatus::InProgress,
    ];

    pub fn parse(label: &str) -> Self {
        match label {
            "Created" => Self::Created,
            "Queued" => Self::Queued,
            "InProgress" => Self::InProgress,
            "Baking" => Self::Baking,
            "Ready" => Self::Ready,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "Created",
            Self::Queued => "Queued",
            Self::InProgress => "InProgress",
            Self::Baking => "Baking",
            Self::Ready => "Ready",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Stopped => "Stopped",
            Self::Other(s) => s,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Created | Self::Queued | Self::InProgress)
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rollout state of a service, recomputed on every reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// The tracker knows of no deployment.
    None,
    /// At least one deployment is in flight.
    Pending,
    /// Deployments exist and all of them have finished.
    Completed,
}

impl DeploymentState {
    pub fn from_statuses(statuses: &[DeploymentStatus]) -> Self {
        if statuses.is_empty() {
            Self::None
        } else if statuses.iter().any(DeploymentStatus::is_in_flight) {
            Self::Pending
        } else {
            Self::Completed
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
