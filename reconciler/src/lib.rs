//! Capacity-strategy reconciliation.
//!
//! A notification about a service flows through:
//!
//! ```text
//! normalizer -> Reconciler -> { DeploymentGate -> ClusterStateReader -> StrategyMutator } -> outcome
//! ```
//!
//! [`BatchDispatcher`] fans a batch out to independent reconciliations and
//! [`InvocationHandler`] turns a raw payload into the wire response.

pub mod bounded;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod handler;
pub mod locks;
pub mod metrics;
pub mod mutator;
pub mod normalizer;
pub mod reconciler;
pub mod state_reader;

pub use config::{GatePolicy, ReconcilerConfig};
pub use dispatcher::BatchDispatcher;
pub use error::{ConfigError, ReconcileError};
pub use gate::DeploymentGate;
pub use handler::InvocationHandler;
pub use locks::IdentityLocks;
pub use metrics::counters::{CountersSnapshot, OutcomeCounters};
pub use mutator::StrategyMutator;
pub use normalizer::{InvalidEvent, normalize};
pub use reconciler::Reconciler;
pub use state_reader::ClusterStateReader;
