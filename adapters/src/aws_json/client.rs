use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::AdapterError;

const AMZ_JSON_1_1: &str = "application/x-amz-json-1.1";
const AMZ_TARGET: &str = "X-Amz-Target";

/// Longest raw body excerpt kept in an error message.
const MAX_ERROR_BODY: usize = 160;

/// Minimal AWS JSON 1.1 client: every operation is a `POST /` with the
/// operation named in `X-Amz-Target`.
#[derive(Clone)]
pub struct AwsJsonClient {
    http: Client,
    endpoint: String,
    target_prefix: &'static str,
}

impl AwsJsonClient {
    pub fn new(
        endpoint: String,
        target_prefix: &'static str,
        timeout: Duration,
    ) -> Result<Self, AdapterError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            target_prefix,
        })
    }

    #[instrument(
        skip(self, request),
        fields(target_prefix = %self.target_prefix),
        level = "debug"
    )]
    pub async fn call<Req, Resp>(
        &self,
        operation: &'static str,
        request: &Req,
    ) -> Result<Resp, AdapterError>
    where
        Req: Serialize + Sync + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)?;

        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, AMZ_JSON_1_1)
            .header(AMZ_TARGET, format!("{}.{}", self.target_prefix, operation))
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &bytes));
        }

        debug!(status = status.as_u16(), len = bytes.len(), "aws json call completed");

        serde_json::from_slice(&bytes)
            .map_err(|e| AdapterError::InvalidResponse(format!("{operation}: {e}")))
    }
}

/// Turn an AWS JSON error body into [`AdapterError::Api`].
///
/// The error code comes from `__type` (or `code`), with any namespace before
/// `#` and any suffix after `:` removed. Unparseable bodies keep a truncated
/// excerpt as the message.
pub fn parse_api_error(status: u16, body: &[u8]) -> AdapterError {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    let code = parsed
        .as_ref()
        .and_then(|v| v.get("__type").or_else(|| v.get("code")))
        .and_then(Value::as_str)
        .map(|raw| {
            let after_ns = raw.rsplit('#').next().unwrap_or(raw);
            after_ns.split(':').next().unwrap_or(after_ns).to_string()
        })
        .unwrap_or_else(|| "UnknownError".to_string());

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("Message")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body);
            text.chars().take(MAX_ERROR_BODY).collect()
        });

    AdapterError::Api {
        status,
        code,
        message,
    }
}
