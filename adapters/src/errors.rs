use thiserror::Error;

/// Error codes the control plane and rollout tracker use for rate limiting.
const THROTTLING_CODES: [&str; 4] = [
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "RequestLimitExceeded",
];

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{code} (http {status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Invalid or missing adapter settings, reported at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdapterConfigError {
    #[error("{0} is not set; requests are unsigned, so it must name a signing gateway or a local emulator")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?} ({expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl AdapterError {
    /// The service error code, when the remote side returned one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_throttling(&self) -> bool {
        match self {
            Self::Api { status, code, .. } => {
                *status == 429 || THROTTLING_CODES.contains(&code.as_str())
            }
            Self::Http(e) => e.status().is_some_and(|s| s.as_u16() == 429),
            _ => false,
        }
    }

}
