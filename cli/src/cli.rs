use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use reconciler::{GatePolicy, ReconcilerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GatePolicyCli {
    /// Proceed with the update when the deployment query fails
    Open,
    /// Defer the update when the deployment query fails
    Closed,
}

#[derive(Debug, Parser)]
#[clap(name = "spotshift", version)]
pub struct Cli {
    /// Notification or batch envelope to process; reads stdin when omitted
    #[clap(long)]
    pub event: Option<PathBuf>,

    /// Override SPOTSHIFT_GATE_POLICY
    #[clap(long, value_enum)]
    pub gate_policy: Option<GatePolicyCli>,

    /// Override SPOTSHIFT_TARGET_PROVIDER
    #[clap(long)]
    pub target_provider: Option<String>,

    /// Override SPOTSHIFT_BATCH_CONCURRENCY
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_concurrency: Option<u64>,

    /// Override SPOTSHIFT_CALL_TIMEOUT_MS
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub call_timeout_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[clap(long, env = "SPOTSHIFT_LOG_JSON")]
    pub json_logs: bool,
}

pub(crate) fn cli_to_gate_policy(p: GatePolicyCli) -> GatePolicy {
    match p {
        GatePolicyCli::Open => GatePolicy::FailOpen,
        GatePolicyCli::Closed => GatePolicy::FailClosed,
    }
}

/// Apply command-line overrides on top of the environment configuration.
pub(crate) fn build_config(cli: &Cli, mut cfg: ReconcilerConfig) -> ReconcilerConfig {
    if let Some(p) = cli.gate_policy {
        cfg.gate_policy = cli_to_gate_policy(p);
    }
    if let Some(provider) = &cli.target_provider {
        cfg.target_provider = provider.clone();
    }
    if let Some(n) = cli.batch_concurrency {
        cfg.batch_concurrency = n as usize;
    }
    if let Some(ms) = cli.call_timeout_ms {
        cfg.call_timeout = Duration::from_millis(ms);
    }
    cfg
}
