//! External boundaries of the reconciler.
//!
//! Two ports are defined here as async traits so the reconciler can be
//! handed real clients or test doubles:
//!
//! - [`ControlPlane`]: reads and rewrites a service's capacity provider strategy.
//! - [`RolloutTracker`]: lists the deployments recorded for a service.
//!
//! The HTTP implementations speak the AWS JSON 1.1 protocol through
//! [`aws_json::AwsJsonClient`].

pub mod aws_json;
pub mod config;
pub mod control_plane;
pub mod errors;
pub mod rollout;

pub use config::AdapterConfig;
pub use control_plane::{ControlPlane, EcsControlPlane, ServiceDescription};
pub use errors::{AdapterConfigError, AdapterError};
pub use rollout::{CodeDeployTracker, RolloutTracker};
