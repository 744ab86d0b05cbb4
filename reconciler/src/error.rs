use std::time::Duration;

use thiserror::Error;

use adapters::AdapterError;

/// Longest failure reason carried into an outcome.
const MAX_REASON: usize = 160;

/// Failure of one external call made during a reconciliation.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("{call} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        call: &'static str,
        timeout: Duration,
    },

    #[error("{call} failed: {source}")]
    Adapter {
        call: &'static str,
        #[source]
        source: AdapterError,
    },
}

impl ReconcileError {
    /// Bounded, single-line reason for [`corelib::ReconcileOutcome::Failed`].
    pub fn reason(&self) -> String {
        let s = self.to_string().replace('\n', " ");
        if s.chars().count() > MAX_REASON {
            let cut: String = s.chars().take(MAX_REASON).collect();
            format!("{cut}...")
        } else {
            s
        }
    }

    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::Adapter { source, .. } if source.is_throttling())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_reason_names_the_call() {
        let e = ReconcileError::Timeout {
            call: "describe_service",
            timeout: Duration::from_millis(250),
        };
        assert_eq!(e.reason(), "describe_service timed out after 250ms");
    }

    #[test]
    fn long_reasons_are_bounded() {
        let e = ReconcileError::Adapter {
            call: "update_service_strategy",
            source: AdapterError::Api {
                status: 400,
                code: "InvalidParameterException".into(),
                message: "y".repeat(400),
            },
        };

        let reason = e.reason();
        assert!(reason.starts_with("update_service_strategy failed: InvalidParameterException"));
        assert_eq!(reason.chars().count(), MAX_REASON + 3);
    }

    #[test]
    fn throttling_is_visible_through_the_wrapper() {
        let e = ReconcileError::Adapter {
            call: "describe_service",
            source: AdapterError::Api {
                status: 400,
                code: "ThrottlingException".into(),
                message: "Rate exceeded".into(),
            },
        };
        assert!(e.is_throttling());
    }
}
