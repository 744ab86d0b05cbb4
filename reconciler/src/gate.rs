//! Deployment gate: no strategy change is submitted while a rollout is in flight.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use adapters::RolloutTracker;
use corelib::{DeploymentState, DeploymentStatus, ServiceIdentity};

use crate::bounded::bounded;
use crate::config::GatePolicy;
use crate::error::ReconcileError;

pub struct DeploymentGate {
    tracker: Arc<dyn RolloutTracker>,
    policy: GatePolicy,
    call_timeout: Duration,
}

impl DeploymentGate {
    pub fn new(tracker: Arc<dyn RolloutTracker>, policy: GatePolicy, call_timeout: Duration) -> Self {
        Self {
            tracker,
            policy,
            call_timeout,
        }
    }

    /// Current rollout state, or the query error.
    pub async fn deployment_state(
        &self,
        identity: &ServiceIdentity,
    ) -> Result<DeploymentState, ReconcileError> {
        let application = identity.deploy_application();
        let group = identity.deployment_group();

        let statuses = bounded(
            "list_deployments",
            self.call_timeout,
            self.tracker
                .list_deployments(&application, &group, &DeploymentStatus::IN_FLIGHT),
        )
        .await?;

        let state = DeploymentState::from_statuses(&statuses);
        debug!(
            %application,
            %group,
            deployments = statuses.len(),
            ?state,
            "deployment state resolved"
        );
        Ok(state)
    }

    /// Whether a rollout is in flight for `identity`.
    ///
    /// A failed query is resolved by the configured [`GatePolicy`].
    #[instrument(skip(self, identity), fields(identity = %identity, policy = %self.policy), level = "debug")]
    pub async fn is_deployment_active(&self, identity: &ServiceIdentity) -> bool {
        match self.deployment_state(identity).await {
            Ok(state) => state.is_pending(),
            Err(e) => match self.policy {
                GatePolicy::FailOpen => {
                    warn!(error = %e, policy = %self.policy, "deployment query failed; treating as no active deployment");
                    false
                }
                GatePolicy::FailClosed => {
                    warn!(error = %e, policy = %self.policy, "deployment query failed; treating as active deployment");
                    true
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::AdapterError;
    use async_trait::async_trait;
    use tracing_test::traced_test;

    enum Reply {
        Statuses(Vec<DeploymentStatus>),
        Fail,
        Hang,
    }

    struct StubTracker {
        reply: Reply,
        seen: parking_lot::Mutex<Vec<(String, String, Vec<DeploymentStatus>)>>,
    }

    impl StubTracker {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: parking_lot::Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl RolloutTracker for StubTracker {
        async fn list_deployments(
            &self,
            application: &str,
            group: &str,
            status_filter: &[DeploymentStatus],
        ) -> Result<Vec<DeploymentStatus>, AdapterError> {
            self.seen
                .lock()
                .push((application.into(), group.into(), status_filter.to_vec()));

            match &self.reply {
                Reply::Statuses(s) => Ok(s.clone()),
                Reply::Fail => Err(AdapterError::Api {
                    status: 400,
                    code: "ApplicationDoesNotExistException".into(),
                    message: "No application found".into(),
                }),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3_600)).await;
                    Ok(vec![])
                }
            }
        }
    }

    fn identity() -> ServiceIdentity {
        ServiceIdentity::new("prod", "web-api").unwrap()
    }

    fn gate(tracker: Arc<StubTracker>, policy: GatePolicy) -> DeploymentGate {
        DeploymentGate::new(tracker, policy, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn queries_derived_keys_with_in_flight_filter() {
        let tracker = StubTracker::new(Reply::Statuses(vec![]));
        let g = gate(tracker.clone(), GatePolicy::FailClosed);

        assert!(!g.is_deployment_active(&identity()).await);

        let seen = tracker.seen.lock();
        assert_eq!(seen[0].0, "prod-web-api");
        assert_eq!(seen[0].1, "web-api-deployment-group");
        assert_eq!(seen[0].2, DeploymentStatus::IN_FLIGHT.to_vec());
    }

    #[tokio::test]
    async fn in_progress_deployment_is_active() {
        let g = gate(
            StubTracker::new(Reply::Statuses(vec![DeploymentStatus::InProgress])),
            GatePolicy::FailOpen,
        );
        assert!(g.is_deployment_active(&identity()).await);
    }

    #[tokio::test]
    async fn finished_deployments_are_not_active() {
        let g = gate(
            StubTracker::new(Reply::Statuses(vec![
                DeploymentStatus::Succeeded,
                DeploymentStatus::Stopped,
            ])),
            GatePolicy::FailClosed,
        );

        assert_eq!(
            g.deployment_state(&identity()).await.unwrap(),
            DeploymentState::Completed
        );
        assert!(!g.is_deployment_active(&identity()).await);
    }

    #[tokio::test]
    #[traced_test]
    async fn fail_open_reports_inactive_on_error() {
        let g = gate(StubTracker::new(Reply::Fail), GatePolicy::FailOpen);

        assert!(!g.is_deployment_active(&identity()).await);
        assert!(logs_contain("treating as no active deployment"));
    }

    #[tokio::test]
    #[traced_test]
    async fn fail_closed_reports_active_on_error() {
        let g = gate(StubTracker::new(Reply::Fail), GatePolicy::FailClosed);

        assert!(g.is_deployment_active(&identity()).await);
        assert!(logs_contain("treating as active deployment"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_a_query_failure() {
        let open = gate(StubTracker::new(Reply::Hang), GatePolicy::FailOpen);
        let closed = gate(StubTracker::new(Reply::Hang), GatePolicy::FailClosed);

        assert!(matches!(
            open.deployment_state(&identity()).await,
            Err(ReconcileError::Timeout { .. })
        ));
        assert!(!open.is_deployment_active(&identity()).await);
        assert!(closed.is_deployment_active(&identity()).await);
    }
}
