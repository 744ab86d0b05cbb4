use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use corelib::DEFAULT_SPOT_PROVIDER;

use crate::error::ConfigError;

/// How the deployment gate treats a failure of its own rollout query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatePolicy {
    /// Report "no active deployment" and let the reconciliation proceed.
    ///
    /// Keeps services migrating while the rollout tracker is unavailable, at
    /// the cost of possibly racing an in-flight rollout.
    FailOpen,

    /// Report an active deployment so the reconciliation is deferred.
    #[default]
    FailClosed,
}

impl GatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailOpen => "fail-open",
            Self::FailClosed => "fail-closed",
        }
    }
}

impl fmt::Display for GatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            _ => Err(ConfigError::Invalid {
                key: "SPOTSHIFT_GATE_POLICY",
                value: s.to_string(),
                expected: "fail-open or fail-closed",
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReconcilerConfig {
    /// Capacity provider services are migrated onto.
    ///
    /// A service whose strategy already names this provider is left alone;
    /// otherwise its strategy is replaced by this provider alone, weight 1.
    pub target_provider: String,

    /// Behaviour of the deployment gate when the rollout tracker cannot be queried.
    pub gate_policy: GatePolicy,

    /// Upper bound on every individual external call.
    ///
    /// A call exceeding it is abandoned and the reconciliation reports Failed
    /// (or, for the gate, applies `gate_policy`).
    pub call_timeout: Duration,

    /// Maximum number of batch items reconciled at the same time.
    ///
    /// Items for the same service are serialized regardless of this value.
    pub batch_concurrency: usize,

    /// Ask the control plane to roll the service's tasks when the strategy changes,
    /// so running tasks move onto the new provider.
    pub force_new_deployment: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            target_provider: DEFAULT_SPOT_PROVIDER.to_string(),
            gate_policy: GatePolicy::default(),
            call_timeout: Duration::from_millis(5_000),
            batch_concurrency: 8,
            force_new_deployment: true,
        }
    }
}

impl ReconcilerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("SPOTSHIFT_TARGET_PROVIDER") {
            if v.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "SPOTSHIFT_TARGET_PROVIDER",
                    value: v,
                    expected: "a capacity provider name",
                });
            }
            cfg.target_provider = v.trim().to_string();
        }

        if let Some(v) = lookup("SPOTSHIFT_GATE_POLICY") {
            cfg.gate_policy = v.parse()?;
        }

        if let Some(v) = lookup("SPOTSHIFT_CALL_TIMEOUT_MS") {
            let ms: u64 = parse_positive("SPOTSHIFT_CALL_TIMEOUT_MS", &v)?;
            cfg.call_timeout = Duration::from_millis(ms);
        }

        if let Some(v) = lookup("SPOTSHIFT_BATCH_CONCURRENCY") {
            cfg.batch_concurrency = parse_positive("SPOTSHIFT_BATCH_CONCURRENCY", &v)?;
        }

        if let Some(v) = lookup("SPOTSHIFT_FORCE_NEW_DEPLOYMENT") {
            cfg.force_new_deployment = match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "SPOTSHIFT_FORCE_NEW_DEPLOYMENT",
                        value: v,
                        expected: "true or false",
                    });
                }
            };
        }

        Ok(cfg)
    }
}

fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            expected: "a positive integer",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ReconcilerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.target_provider, "FARGATE_SPOT");
        assert_eq!(cfg.gate_policy, GatePolicy::FailClosed);
        assert_eq!(cfg.call_timeout, Duration::from_secs(5));
        assert_eq!(cfg.batch_concurrency, 8);
        assert!(cfg.force_new_deployment);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = ReconcilerConfig::from_lookup(lookup(&[
            ("SPOTSHIFT_TARGET_PROVIDER", "spot-equivalent"),
            ("SPOTSHIFT_GATE_POLICY", "FAIL_OPEN"),
            ("SPOTSHIFT_CALL_TIMEOUT_MS", "250"),
            ("SPOTSHIFT_BATCH_CONCURRENCY", "2"),
            ("SPOTSHIFT_FORCE_NEW_DEPLOYMENT", "false"),
        ]))
        .unwrap();

        assert_eq!(cfg.target_provider, "spot-equivalent");
        assert_eq!(cfg.gate_policy, GatePolicy::FailOpen);
        assert_eq!(cfg.call_timeout, Duration::from_millis(250));
        assert_eq!(cfg.batch_concurrency, 2);
        assert!(!cfg.force_new_deployment);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("SPOTSHIFT_GATE_POLICY", "sometimes"),
            ("SPOTSHIFT_CALL_TIMEOUT_MS", "0"),
            ("SPOTSHIFT_CALL_TIMEOUT_MS", "soon"),
            ("SPOTSHIFT_BATCH_CONCURRENCY", "-1"),
            ("SPOTSHIFT_FORCE_NEW_DEPLOYMENT", "maybe"),
            ("SPOTSHIFT_TARGET_PROVIDER", "  "),
        ] {
            let err = ReconcilerConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            let ConfigError::Invalid { key: k, .. } = err;
            assert_eq!(k, key);
        }
    }

    #[test]
    fn gate_policy_round_trips() {
        for p in [GatePolicy::FailOpen, GatePolicy::FailClosed] {
            assert_eq!(p.as_str().parse::<GatePolicy>().unwrap(), p);
        }
    }
}
