//! Wire types for the control plane's `DescribeServices` and `UpdateService` operations.

use serde::{Deserialize, Serialize};

use corelib::CapacityStrategyEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityProviderStrategyItem {
    pub capacity_provider: String,

    #[serde(default)]
    pub weight: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<u32>,
}

impl From<&CapacityStrategyEntry> for CapacityProviderStrategyItem {
    fn from(e: &CapacityStrategyEntry) -> Self {
        Self {
            capacity_provider: e.provider_name.clone(),
            weight: e.weight,
            base: e.base,
        }
    }
}

impl From<CapacityProviderStrategyItem> for CapacityStrategyEntry {
    fn from(item: CapacityProviderStrategyItem) -> Self {
        Self {
            provider_name: item.capacity_provider,
            weight: item.weight,
            base: item.base,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesRequest<'a> {
    pub cluster: &'a str,
    pub services: [&'a str; 1],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesResponse {
    #[serde(default)]
    pub services: Vec<ServiceRecord>,

    #[serde(default)]
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub service_name: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub capacity_provider_strategy: Vec<CapacityProviderStrategyItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    #[serde(default)]
    pub arn: Option<String>,

    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest<'a> {
    pub cluster: &'a str,
    pub service: &'a str,
    pub capacity_provider_strategy: Vec<CapacityProviderStrategyItem>,
    pub force_new_deployment: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateServiceResponse {
    #[serde(default)]
    pub service: Option<ServiceRecord>,
}
