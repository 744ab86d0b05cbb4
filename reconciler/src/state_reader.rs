use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use adapters::ControlPlane;
use corelib::{ServiceIdentity, ServiceSnapshot};

use crate::bounded::bounded;
use crate::error::ReconcileError;

/// Reads the current capacity provider strategy of a service.
pub struct ClusterStateReader {
    control_plane: Arc<dyn ControlPlane>,
    call_timeout: Duration,
}

impl ClusterStateReader {
    pub fn new(control_plane: Arc<dyn ControlPlane>, call_timeout: Duration) -> Self {
        Self {
            control_plane,
            call_timeout,
        }
    }

    /// `Ok(None)` when the control plane knows no such service.
    #[instrument(skip(self, identity), fields(identity = %identity), level = "debug")]
    pub async fn fetch_snapshot(
        &self,
        identity: &ServiceIdentity,
    ) -> Result<Option<ServiceSnapshot>, ReconcileError> {
        let description = bounded(
            "describe_service",
            self.call_timeout,
            self.control_plane
                .describe_service(&identity.cluster_name, &identity.service_name),
        )
        .await?;

        let Some(description) = description else {
            debug!("service not found");
            return Ok(None);
        };

        debug!(
            status = %description.status,
            entries = description.capacity_provider_strategy.len(),
            "service snapshot fetched"
        );

        Ok(Some(ServiceSnapshot {
            identity: identity.clone(),
            current_strategy: description.capacity_provider_strategy,
        }))
    }
}
