use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use adapters::ControlPlane;
use corelib::{CapacityStrategyEntry, ServiceIdentity};

use crate::bounded::bounded;
use crate::error::ReconcileError;

/// Replaces a service's capacity provider strategy with the target provider alone.
///
/// The submitted strategy overwrites whatever the service had; applying it
/// twice leaves the service in the same state.
pub struct StrategyMutator {
    control_plane: Arc<dyn ControlPlane>,
    target_provider: String,
    force_new_deployment: bool,
    call_timeout: Duration,
}

impl StrategyMutator {
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        target_provider: String,
        force_new_deployment: bool,
        call_timeout: Duration,
    ) -> Self {
        Self {
            control_plane,
            target_provider,
            force_new_deployment,
            call_timeout,
        }
    }

    pub fn target_provider(&self) -> &str {
        &self.target_provider
    }

    pub fn target_strategy(&self) -> Vec<CapacityStrategyEntry> {
        CapacityStrategyEntry::spot_strategy(&self.target_provider)
    }

    #[instrument(
        skip(self, identity),
        fields(identity = %identity, provider = %self.target_provider),
        level = "debug"
    )]
    pub async fn apply_spot_strategy(&self, identity: &ServiceIdentity) -> Result<(), ReconcileError> {
        let strategy = self.target_strategy();

        bounded(
            "update_service_strategy",
            self.call_timeout,
            self.control_plane.update_service_strategy(
                &identity.cluster_name,
                &identity.service_name,
                &strategy,
                self.force_new_deployment,
            ),
        )
        .await?;

        info!(
            provider = %self.target_provider,
            force_new_deployment = self.force_new_deployment,
            "capacity provider strategy submitted"
        );
        Ok(())
    }
}
