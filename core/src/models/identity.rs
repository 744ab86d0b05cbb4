use std::fmt;

use serde::Serialize;

/// The (cluster, service) pair a notification refers to.
///
/// Built by the event normalizer; never constructed with an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceIdentity {
    pub cluster_name: String,
    pub service_name: String,
}

impl ServiceIdentity {
    /// Returns `None` when either part is empty.
    pub fn new(cluster_name: impl Into<String>, service_name: impl Into<String>) -> Option<Self> {
        let cluster_name = cluster_name.into();
        let service_name = service_name.into();

        if cluster_name.is_empty() || service_name.is_empty() {
            return None;
        }

        Some(Self {
            cluster_name,
            service_name,
        })
    }

    /// Rollout-tracker application key: `{cluster}-{service}`.
    pub fn deploy_application(&self) -> String {
        format!("{}-{}", self.cluster_name, self.service_name)
    }

    /// Rollout-tracker deployment group key: `{service}-deployment-group`.
    pub fn deployment_group(&self) -> String {
        format!("{}-deployment-group", self.service_name)
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster_name, self.service_name)
    }
}
