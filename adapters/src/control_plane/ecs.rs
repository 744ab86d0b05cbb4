use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use corelib::CapacityStrategyEntry;

use super::types::{
    CapacityProviderStrategyItem, DescribeServicesRequest, DescribeServicesResponse,
    UpdateServiceRequest, UpdateServiceResponse,
};
use super::{ControlPlane, ServiceDescription};
use crate::aws_json::AwsJsonClient;
use crate::errors::AdapterError;

const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";

/// Error code returned when the cluster itself does not exist.
const CLUSTER_NOT_FOUND: &str = "ClusterNotFoundException";

/// Status of a deleted service that the control plane still reports for a while.
const INACTIVE: &str = "INACTIVE";

/// [`ControlPlane`] backed by the container service's JSON API.
#[derive(Clone)]
pub struct EcsControlPlane {
    client: AwsJsonClient,
}

impl EcsControlPlane {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, AdapterError> {
        Ok(Self {
            client: AwsJsonClient::new(endpoint, TARGET_PREFIX, timeout)?,
        })
    }
}

/// Pick the live service out of a `DescribeServices` answer.
pub fn live_service(resp: DescribeServicesResponse, service: &str) -> Option<ServiceDescription> {
    resp.services
        .into_iter()
        .filter(|s| s.service_name == service)
        .find(|s| s.status.as_deref() != Some(INACTIVE))
        .map(|s| ServiceDescription {
            service_name: s.service_name,
            status: s.status.unwrap_or_default(),
            capacity_provider_strategy: s
                .capacity_provider_strategy
                .into_iter()
                .map(CapacityStrategyEntry::from)
                .collect(),
        })
}

#[async_trait]
impl ControlPlane for EcsControlPlane {
    #[instrument(skip(self), level = "debug")]
    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceDescription>, AdapterError> {
        let req = DescribeServicesRequest {
            cluster,
            services: [service],
        };

        let resp: DescribeServicesResponse = match self.client.call("DescribeServices", &req).await
        {
            Ok(resp) => resp,
            Err(e) if e.code() == Some(CLUSTER_NOT_FOUND) => {
                debug!("cluster does not exist");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        for f in &resp.failures {
            debug!(arn = ?f.arn, reason = ?f.reason, "describe reported failure");
        }

        Ok(live_service(resp, service))
    }

    #[instrument(skip(self, strategy), fields(entries = strategy.len()), level = "debug")]
    async fn update_service_strategy(
        &self,
        cluster: &str,
        service: &str,
        strategy: &[CapacityStrategyEntry],
        force_new_deployment: bool,
    ) -> Result<(), AdapterError> {
        let req = UpdateServiceRequest {
            cluster,
            service,
            capacity_provider_strategy: strategy
                .iter()
                .map(CapacityProviderStrategyItem::from)
                .collect(),
            force_new_deployment,
        };

        let resp: UpdateServiceResponse = self.client.call("UpdateService", &req).await?;

        if resp.service.is_none() {
            warn!("update accepted without a service description in the response");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(v: serde_json::Value) -> DescribeServicesResponse {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn empty_answer_is_none() {
        let resp = response(json!({
            "services": [],
            "failures": [{ "arn": "arn:aws:ecs:x:1:service/prod/web", "reason": "MISSING" }]
        }));
        assert!(live_service(resp, "web").is_none());
    }

    #[test]
    fn inactive_service_is_none() {
        let resp = response(json!({
            "services": [{ "serviceName": "web", "status": "INACTIVE" }]
        }));
        assert!(live_service(resp, "web").is_none());
    }

    #[test]
    fn active_service_maps_strategy() {
        let resp = response(json!({
            "services": [{
                "serviceName": "web",
                "status": "ACTIVE",
                "capacityProviderStrategy": [
                    { "capacityProvider": "FARGATE", "weight": 1, "base": 2 }
                ]
            }]
        }));

        let d = live_service(resp, "web").unwrap();
        assert_eq!(d.status, "ACTIVE");
        assert_eq!(d.capacity_provider_strategy[0].provider_name, "FARGATE");
        assert_eq!(d.capacity_provider_strategy[0].base, Some(2));
    }
}
