//! Extracts the (cluster, service) identity from an inbound notification.
//!
//! Extraction is best-effort: a missing key, a non-object `detail` or a
//! non-string value all yield an empty string, never an error. The event is
//! rejected only when one of the two parts ends up empty.
//
//  Pure: no async, no IO.

use serde_json::Value;
use thiserror::Error;

use corelib::ServiceIdentity;

const SERVICE_PREFIX: &str = "service:";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("event is missing cluster or service identity (cluster={cluster:?}, service={service:?})")]
pub struct InvalidEvent {
    pub cluster: String,
    pub service: String,
}

/// `detail.clusterArn` → cluster name (text after the last `/`).
pub fn extract_cluster(event: &Value) -> String {
    detail_str(event, "clusterArn")
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// `detail.group` → service name (literal `service:` prefix removed).
pub fn extract_service(event: &Value) -> String {
    let group = detail_str(event, "group");
    group
        .strip_prefix(SERVICE_PREFIX)
        .unwrap_or(group)
        .to_string()
}

pub fn normalize(event: &Value) -> Result<ServiceIdentity, InvalidEvent> {
    let cluster = extract_cluster(event);
    let service = extract_service(event);

    ServiceIdentity::new(cluster.clone(), service.clone())
        .ok_or(InvalidEvent { cluster, service })
}

fn detail_str<'a>(event: &'a Value, key: &str) -> &'a str {
    event
        .get("detail")
        .and_then(|d| d.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
}
