pub mod ecs;
pub mod types;

use async_trait::async_trait;

use corelib::CapacityStrategyEntry;

use crate::errors::AdapterError;

pub use ecs::EcsControlPlane;

/// What the control plane reports about one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    pub service_name: String,
    pub status: String,
    pub capacity_provider_strategy: Vec<CapacityStrategyEntry>,
}

/// Container-orchestration control plane.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// `Ok(None)` when the cluster holds no live service with that name.
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceDescription>, AdapterError>;

    /// Replace the service's strategy with `strategy` (no merge).
    async fn update_service_strategy(
        &self,
        cluster: &str,
        service: &str,
        strategy: &[CapacityStrategyEntry],
        force_new_deployment: bool,
    ) -> Result<(), AdapterError>;
}
