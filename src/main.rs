// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use kube_secret_watcher::config::Config;
use kube_secret_watcher::health::{self, HealthState};
use kube_secret_watcher::metrics;
use kube_secret_watcher::sync::SyncManager;
use kube_secret_watcher::watch::SecretWatch;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting kube-secret-watcher");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: retry_interval={:?}, health_addr={}",
        config.retry_interval, config.health_addr
    );

    // Create Kubernetes client
    let kube_config = kube::Config::infer().await?;
    debug!("Kubernetes API server: {}", kube_config.cluster_url);
    let client = Client::try_from(kube_config.clone())?;

    let namespace = config
        .watch_namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());
    info!("Distributing Secrets from namespace {}", namespace);

    metrics::register_metrics()?;

    let (sync_manager, sync_handle) =
        SyncManager::new(client.clone(), namespace.clone(), config.retry_interval);
    let secret_watch = SecretWatch::new(client, namespace, sync_handle);

    // A failing watch ends try_join! and with it the process
    tokio::try_join!(
        sync_manager.run(),
        secret_watch.run(),
        health::serve(config.health_addr, HealthState::new(kube_config))
    )?;

    warn!("All tasks stopped unexpectedly");
    Ok(())
}
