
use std::sync::Arc;

use serde_json::{Value, json};

use corelib::{CapacityStrategyEntry, DeploymentStatus};
use mock_cluster::*;
use reconciler::{GatePolicy, InvocationHandler};

fn handler(cp: &Arc<MockControlPlane>, tracker: &Arc<MockTracker>) -> InvocationHandler {
    let r = reconciler(cp, tracker, &config(GatePolicy::FailClosed));
    InvocationHandler::new(Arc::new(r), 4)
}

async fn invoke(h: &InvocationHandler, payload: Value) -> Value {
    serde_json::to_value(h.handle(payload).await).unwrap()
}

#[tokio::test]
async fn single_event_answers_status_and_message() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "web-api", &[("FARGATE", 1)]);

    let v = invoke(&handler(&cp, &tracker), event("prod", "web-api")).await;

    assert_eq!(v["status"], json!("OK"));
    assert!(v["message"].as_str().unwrap().contains("updated"));
    assert!(v.get("results").is_none());
}

#[tokio::test]
async fn deferred_event_answers_waiting() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "web-api", &[("FARGATE", 1)]);
    tracker.with_deployment("prod", "web-api", DeploymentStatus::InProgress);

    let v = invoke(&handler(&cp, &tracker), event("prod", "web-api")).await;

    assert_eq!(v["status"], json!("Aguardando"));
    assert_eq!(cp.updates(), 0);
}

#[tokio::test]
async fn invalid_event_answers_error() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();

    let v = invoke(
        &handler(&cp, &tracker),
        json!({ "detail": { "clusterArn": "arn:aws:ecs:us-east-1:1:cluster/prod" } }),
    )
    .await;

    assert_eq!(v["status"], json!("Erro"));
    assert_eq!(cp.describes(), 0);
    assert_eq!(tracker.calls(), 0);
}

#[tokio::test]
async fn documented_single_events() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod-cluster", "web-api", &[("FARGATE", 1)]);
    let h = handler(&cp, &tracker);

    let migrate = json!({
        "detail": {
            "clusterArn": "arn:aws:ecs:us-east-1:123456789012:cluster/prod-cluster",
            "group": "service:web-api"
        }
    });

    let first = invoke(&h, migrate.clone()).await;
    assert_eq!(first["status"], json!("OK"));
    assert_eq!(
        cp.strategy_of("prod-cluster", "web-api").unwrap(),
        vec![CapacityStrategyEntry::new(SPOT, 1)]
    );

    let again = invoke(&h, migrate).await;
    assert_eq!(again["status"], json!("OK"));
    assert_eq!(cp.updates(), 1);

    let missing_group = invoke(
        &h,
        json!({ "detail": { "clusterArn": "arn:aws:ecs:us-east-1:123456789012:cluster/prod-cluster" } }),
    )
    .await;
    assert_eq!(missing_group["status"], json!("Erro"));
}

#[tokio::test]
async fn batch_answers_results_in_order() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "a", &[("FARGATE", 1)]);
    cp.with_service("prod", "b", &[("FARGATE", 1)]);
    cp.with_service("prod", "c", &[(SPOT, 1)]);
    tracker.with_deployment("prod", "b", DeploymentStatus::Created);

    let payload = batch(&[event("prod", "a"), event("prod", "b"), event("prod", "c")]);
    let v = invoke(&handler(&cp, &tracker), payload).await;

    assert_eq!(v["status"], json!("OK"));
    let results = v["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["status"], json!("OK"));
    assert_eq!(results[1]["status"], json!("Aguardando"));
    assert_eq!(results[2]["status"], json!("OK"));
    assert!(v.get("message").is_none());
}

#[tokio::test]
async fn unreadable_records_fail_alone() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "a", &[("FARGATE", 1)]);

    let payload = json!({
        "Records": [
            { "messageId": "m-0", "body": "{not json" },
            { "messageId": "m-1" },
            { "messageId": "m-2", "body": event("prod", "a").to_string() }
        ]
    });
    let v = invoke(&handler(&cp, &tracker), payload).await;

    let results = v["results"].as_array().unwrap();
    assert_eq!(results[0]["status"], json!("Erro"));
    assert_eq!(results[1]["status"], json!("Erro"));
    assert_eq!(results[2]["status"], json!("OK"));
    assert_eq!(cp.updates(), 1);
}

#[tokio::test]
async fn empty_batch_is_ok() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();

    let v = invoke(&handler(&cp, &tracker), json!({ "Records": [] })).await;

    assert_eq!(v, json!({ "status": "OK", "results": [] }));
}

#[tokio::test]
async fn handler_shares_counters_with_reconciler() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "a", &[("FARGATE", 1)]);
    let h = handler(&cp, &tracker);

    invoke(&h, batch(&[event("prod", "a"), json!({})])).await;

    let snap = h.reconciler().counters().snapshot();
    assert_eq!(snap.updated, 1);
    assert_eq!(snap.invalid_event, 1);
    assert_eq!(snap.total(), 2);
}

#[tokio::test]
async fn malformed_record_does_not_demote_the_batch() {
    let cp = MockControlPlane::new();
    let tracker = MockTracker::new();
    cp.with_service("prod", "a", &[("FARGATE", 1)]);
    cp.with_service("prod", "b", &[("FARGATE", 1)]);

    let payload = json!({
        "Records": [
            { "messageId": "m-0", "body": event("prod", "a").to_string() },
            { "messageId": "m-1", "body": { "detail": {} } },
            17,
            { "messageId": "m-3", "body": event("prod", "b").to_string() }
        ]
    });
    let v = invoke(&handler(&cp, &tracker), payload).await;

    assert_eq!(v["status"], json!("OK"));
    let results = v["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["status"], json!("OK"));
    assert_eq!(results[1]["status"], json!("Erro"));
    assert_eq!(results[2]["status"], json!("Erro"));
    assert_eq!(results[3]["status"], json!("OK"));
    assert_eq!(cp.updates(), 2);
}
