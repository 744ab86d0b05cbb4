use serde::{Deserialize, Serialize};

use super::ServiceIdentity;

/// Capacity provider the reconciler migrates services onto unless configured otherwise.
pub const DEFAULT_SPOT_PROVIDER: &str = "FARGATE_SPOT";

/// One provider/weight entry of a service's capacity-provisioning strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityStrategyEntry {
    pub provider_name: String,
    pub weight: u32,

    /// Minimum number of tasks placed on this provider, when the control plane reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<u32>,
}

impl CapacityStrategyEntry {
    pub fn new(provider_name: impl Into<String>, weight: u32) -> Self {
        Self {
            provider_name: provider_name.into(),
            weight,
            base: None,
        }
    }

    /// The replacement strategy submitted on migration: the target provider alone, weight 1.
    pub fn spot_strategy(provider_name: &str) -> Vec<Self> {
        vec![Self::new(provider_name, 1)]
    }
}

/// Point-in-time view of a service's provisioning, fetched fresh per reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSnapshot {
    pub identity: ServiceIdentity,
    pub current_strategy: Vec<CapacityStrategyEntry>,
}

impl ServiceSnapshot {
    /// Membership only; order and weight are ignored.
    pub fn uses_provider(&self, provider_name: &str) -> bool {
        self.current_strategy
            .iter()
            .any(|e| e.provider_name == provider_name)
    }
}
