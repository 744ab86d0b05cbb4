use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use corelib::DeploymentStatus;

use super::RolloutTracker;
use super::types::{
    BatchGetDeploymentsRequest, BatchGetDeploymentsResponse, DeploymentInfo,
    ListDeploymentsRequest, ListDeploymentsResponse,
};
use crate::aws_json::AwsJsonClient;
use crate::errors::AdapterError;

const TARGET_PREFIX: &str = "CodeDeploy_20141006";

/// `BatchGetDeployments` accepts at most this many ids per call.
const BATCH_GET_LIMIT: usize = 25;

/// Upper bound on `ListDeployments` pages followed for one query.
const MAX_PAGES: usize = 20;

/// [`RolloutTracker`] backed by the deployment service's JSON API.
#[derive(Clone)]
pub struct CodeDeployTracker {
    client: AwsJsonClient,
}

impl CodeDeployTracker {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, AdapterError> {
        Ok(Self {
            client: AwsJsonClient::new(endpoint, TARGET_PREFIX, timeout)?,
        })
    }

    async fn list_ids(
        &self,
        application: &str,
        group: &str,
        status_filter: &[DeploymentStatus],
    ) -> Result<Vec<String>, AdapterError> {
        let statuses: Vec<&str> = status_filter.iter().map(DeploymentStatus::as_str).collect();

        let mut ids = Vec::new();
        let mut next_token = None;

        for _ in 0..MAX_PAGES {
            let req = ListDeploymentsRequest {
                application_name: application,
                deployment_group_name: group,
                include_only_statuses: statuses.clone(),
                next_token: next_token.take(),
            };

            let page: ListDeploymentsResponse = self.client.call("ListDeployments", &req).await?;
            ids.extend(page.deployments);

            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => return Ok(ids),
            }
        }

        warn!(pages = MAX_PAGES, "deployment listing truncated");
        Ok(ids)
    }
}

/// Statuses for every listed id, in listing order.
///
/// Every listed id matched the status filter when it was listed, so an id the
/// tracker then fails to describe is an invalid response, not a finished rollout.
pub fn statuses_for(
    ids: &[String],
    infos: &[DeploymentInfo],
) -> Result<Vec<DeploymentStatus>, AdapterError> {
    ids.iter()
        .map(|id| {
            infos
                .iter()
                .find(|info| info.deployment_id.as_deref() == Some(id.as_str()))
                .and_then(|info| info.status.as_deref())
                .map(DeploymentStatus::parse)
                .ok_or_else(|| {
                    AdapterError::InvalidResponse(format!(
                        "deployment {id} was listed but has no status"
                    ))
                })
        })
        .collect()
}

#[async_trait]
impl RolloutTracker for CodeDeployTracker {
    #[instrument(skip(self, status_filter), level = "debug")]
    async fn list_deployments(
        &self,
        application: &str,
        group: &str,
        status_filter: &[DeploymentStatus],
    ) -> Result<Vec<DeploymentStatus>, AdapterError> {
        let ids = self.list_ids(application, group, status_filter).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut infos = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(BATCH_GET_LIMIT) {
            let req = BatchGetDeploymentsRequest {
                deployment_ids: chunk,
            };
            let resp: BatchGetDeploymentsResponse =
                self.client.call("BatchGetDeployments", &req).await?;
            infos.extend(resp.deployments_info);
        }

        let statuses = statuses_for(&ids, &infos)?;
        debug!(count = statuses.len(), "deployments listed");
        Ok(statuses)
    }
}
