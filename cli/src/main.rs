pub mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::info;

use adapters::{AdapterConfig, CodeDeployTracker, EcsControlPlane};
use cli::*;
use common::init_logger;
use reconciler::{InvocationHandler, Reconciler, ReconcilerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger("spotshift", cli.json_logs);

    let cfg = build_config(
        &cli,
        ReconcilerConfig::from_env().context("invalid reconciler configuration")?,
    );
    let aws = AdapterConfig::from_env().context("invalid adapter configuration")?;

    info!(
        region = %aws.region,
        ecs_endpoint = %aws.ecs_endpoint,
        codedeploy_endpoint = %aws.codedeploy_endpoint,
        target_provider = %cfg.target_provider,
        gate_policy = %cfg.gate_policy,
        batch_concurrency = cfg.batch_concurrency,
        "spotshift starting"
    );

    let control_plane = EcsControlPlane::new(aws.ecs_endpoint.clone(), aws.http_timeout)
        .context("building control plane client")?;
    let tracker = CodeDeployTracker::new(aws.codedeploy_endpoint.clone(), aws.http_timeout)
        .context("building rollout tracker client")?;

    let reconciler = Arc::new(Reconciler::new(
        Arc::new(control_plane),
        Arc::new(tracker),
        &cfg,
    ));
    let handler = InvocationHandler::new(Arc::clone(&reconciler), cfg.batch_concurrency);

    let payload = read_payload(&cli).await?;
    let response = handler.handle(payload).await;

    println!("{}", serde_json::to_string(&response)?);

    let snap = reconciler.counters().snapshot();
    info!(
        total = snap.total(),
        updated = snap.updated,
        no_change_needed = snap.no_change_needed,
        deferred = snap.deferred_active_deployment,
        invalid = snap.invalid_event,
        not_found = snap.not_found,
        failed = snap.failed,
        "invocation finished"
    );

    Ok(())
}

async fn read_payload(cli: &Cli) -> anyhow::Result<Value> {
    let raw = match &cli.event {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("reading stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("payload is not valid JSON")
}
