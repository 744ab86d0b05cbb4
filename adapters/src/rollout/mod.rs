pub mod codedeploy;
pub mod types;

use async_trait::async_trait;

use corelib::DeploymentStatus;

use crate::errors::AdapterError;

pub use codedeploy::CodeDeployTracker;

/// External rollout-tracking system.
#[async_trait]
pub trait RolloutTracker: Send + Sync {
    /// Statuses of the deployments recorded for `application`/`group`,
    /// restricted to `status_filter` when it is not empty.
    async fn list_deployments(
        &self,
        application: &str,
        group: &str,
        status_filter: &[DeploymentStatus],
    ) -> Result<Vec<DeploymentStatus>, AdapterError>;
}
