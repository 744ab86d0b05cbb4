//! Wire types for the rollout tracker's `ListDeployments` and `BatchGetDeployments` operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentsRequest<'a> {
    pub application_name: &'a str,
    pub deployment_group_name: &'a str,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_only_statuses: Vec<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentsResponse {
    #[serde(default)]
    pub deployments: Vec<String>,

    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetDeploymentsRequest<'a> {
    pub deployment_ids: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetDeploymentsResponse {
    #[serde(default)]
    pub deployments_info: Vec<DeploymentInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    #[serde(default)]
    pub deployment_id: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}
