pub mod deployment;
pub mod envelope;
pub mod identity;
pub mod outcome;
pub mod response;
pub mod strategy;

pub use deployment::{DeploymentState, DeploymentStatus};
pub use envelope::{BatchEnvelope, BatchRecord, InboundPayload};
pub use identity::ServiceIdentity;
pub use outcome::ReconcileOutcome;
pub use response::{BatchResponse, HandlerResponse, InvocationResponse, ResponseStatus};
pub use strategy::{CapacityStrategyEntry, DEFAULT_SPOT_PROVIDER, ServiceSnapshot};
