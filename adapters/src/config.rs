use std::time::Duration;

use crate::errors::AdapterConfigError;

const ECS_ENDPOINT: &str = "SPOTSHIFT_ECS_ENDPOINT";
const CODEDEPLOY_ENDPOINT: &str = "SPOTSHIFT_CODEDEPLOY_ENDPOINT";
const HTTP_TIMEOUT_MS: &str = "SPOTSHIFT_HTTP_TIMEOUT_MS";

/// Endpoints and transport settings for the external clients.
///
/// Requests are sent unsigned, so both endpoints must be given explicitly:
/// a signing gateway in front of the real services, or a local emulator.
/// There is no default that points at the public service endpoints.
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    /// Informational; carried into startup logs.
    pub region: String,

    /// Container control plane endpoint (AWS JSON 1.1).
    pub ecs_endpoint: String,

    /// Rollout tracker endpoint (AWS JSON 1.1).
    pub codedeploy_endpoint: String,

    /// Transport-level timeout applied by the HTTP client to every request.
    pub http_timeout: Duration,
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, AdapterConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup("AWS_REGION")
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "us-east-1".to_string());

        let http_timeout = match lookup(HTTP_TIMEOUT_MS) {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(AdapterConfigError::Invalid {
                        key: HTTP_TIMEOUT_MS,
                        value: v,
                        expected: "a positive integer",
                    });
                }
            },
            None => Duration::from_secs(10),
        };

        Ok(Self {
            ecs_endpoint: endpoint(&lookup, ECS_ENDPOINT)?,
            codedeploy_endpoint: endpoint(&lookup, CODEDEPLOY_ENDPOINT)?,
            region,
            http_timeout,
        })
    }
}

fn endpoint<F>(lookup: &F, key: &'static str) -> Result<String, AdapterConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or(AdapterConfigError::Missing(key))?;
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AdapterConfigError::Missing(key));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AdapterConfigError::Invalid {
            key,
            value,
            expected: "an http:// or https:// URL",
        });
    }

    Ok(trimmed.to_string())
}
