use serde::Serialize;

use super::ReconcileOutcome;

/// Machine-parseable status of an invocation.
///
/// The wire labels are fixed by the consumers of these responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Erro")]
    Error,
    #[serde(rename = "Aguardando")]
    Waiting,
}

/// `{status, message}` answer for a single event or one batch item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl From<&ReconcileOutcome> for HandlerResponse {
    fn from(outcome: &ReconcileOutcome) -> Self {
        Self {
            status: outcome.status(),
            message: outcome.message(),
        }
    }
}

/// `{status: "OK", results: [...]}` answer for a batch; the batch itself always succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResponse {
    pub status: ResponseStatus,
    pub results: Vec<HandlerResponse>,
}

impl BatchResponse {
    pub fn from_outcomes(outcomes: &[ReconcileOutcome]) -> Self {
        Self {
            status: ResponseStatus::Ok,
            results: outcomes.iter().map(HandlerResponse::from).collect(),
        }
    }
}

/// Whatever one invocation answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InvocationResponse {
    Single(HandlerResponse),
    Batch(BatchResponse),
}
