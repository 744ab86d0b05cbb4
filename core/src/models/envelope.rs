//! Inbound notification shapes.
//!
//! A single notification is an arbitrary JSON object whose identity lives in
//! `detail.clusterArn` / `detail.group`; it stays a `serde_json::Value` so the
//! normalizer can extract fields best-effort. A batch wraps such payloads as
//! JSON strings inside `Records[].body`.

use serde_json::Value;

/// One element of a batch's `Records` array, read leniently: a record that is
/// not an object or whose `body` is not a string still becomes a record.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub body: Option<Value>,
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEnvelope {
    pub records: Vec<BatchRecord>,
}

/// What one invocation received.
#[derive(Debug, Clone)]
pub enum InboundPayload {
    Single(Value),
    Batch(BatchEnvelope),
}

impl InboundPayload {
    /// A payload carrying a `Records` array is a batch; anything else is a single event.
    pub fn classify(payload: Value) -> Self {
        match payload.get("Records").and_then(Value::as_array) {
            Some(records) => Self::Batch(BatchEnvelope {
                records: records.iter().map(BatchRecord::from_value).collect(),
            }),
            None => Self::Single(payload),
        }
    }
}

impl BatchRecord {
    pub fn from_value(record: &Value) -> Self {
        Self {
            body: record.get("body").cloned(),
            message_id: record
                .get("messageId")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Parse the record body into a notification.
    pub fn payload(&self) -> Result<Value, String> {
        match &self.body {
            Some(Value::String(body)) => serde_json::from_str(body).map_err(|e| e.to_string()),
            Some(Value::Null) | None => Err("record has no body".to_string()),
            Some(_) => Err("record body is not a string".to_string()),
        }
    }
}
