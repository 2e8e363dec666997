// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Central coordinator that distributes Secrets into their target namespaces.

use crate::constants::{defaults, CLUSTER_CA_CERT_SECRET};
use crate::kubernetes::{create_or_replace, find_secret};
use crate::metrics;
use crate::sync::classify::{classify, DistributionPath};
use crate::sync::distribute::distribute_secret;
use crate::sync::retry::RetryQueue;
use crate::sync::transform::{build_for_path, build_kafka_user_secret, derived_name};
use k8s_openapi::api::core::v1::Secret;
use kube::{Client, ResourceExt};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

/// What happened to a watched Secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAction {
    Added,
    Modified,
    Deleted,
    Error,
}

impl SecretAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretAction::Added => "ADDED",
            SecretAction::Modified => "MODIFIED",
            SecretAction::Deleted => "DELETED",
            SecretAction::Error => "ERROR",
        }
    }
}

impl fmt::Display for SecretAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change notification for a Secret in the watched namespace
#[derive(Debug, Clone)]
pub struct SecretEvent {
    pub action: SecretAction,
    pub secret: Secret,
}

/// Central coordinator for distributing Secrets.
///
/// Receives notifications from the Secret watch and sweeps the retry queue on a
/// fixed interval. Both run on this one task, which is the only owner of the
/// retry queue.
pub struct SyncManager {
    client: Client,
    /// Namespace the source Secrets live in, used as prefix for distributed names
    own_namespace: String,
    retry_interval: Duration,
    event_rx: mpsc::Receiver<SecretEvent>,
    retry_queue: RetryQueue,
}

/// Handle to send events to the SyncManager
#[derive(Clone)]
pub struct SyncManagerHandle {
    event_tx: mpsc::Sender<SecretEvent>,
}

impl SyncManagerHandle {
    pub async fn send(&self, event: SecretEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to SyncManager: {}", e);
        }
    }
}

impl SyncManager {
    pub fn new(
        client: Client,
        own_namespace: String,
        retry_interval: Duration,
    ) -> (Self, SyncManagerHandle) {
        let (event_tx, event_rx) = mpsc::channel(defaults::EVENT_CHANNEL_CAPACITY);

        let manager = Self {
            client,
            own_namespace,
            retry_interval,
            event_rx,
            retry_queue: RetryQueue::new(),
        };

        let handle = SyncManagerHandle { event_tx };
        (manager, handle)
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(
            "SyncManager started for namespace {}, retrying failures every {:?}",
            self.own_namespace, self.retry_interval
        );

        let mut retry_timer = tokio::time::interval(self.retry_interval);
        retry_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        retry_timer.tick().await;

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(SecretEvent { action, secret }) => {
                        self.handle_event(action, &secret).await
                    }
                    None => {
                        info!("Event channel closed, SyncManager stopping");
                        return Ok(());
                    }
                },
                _ = retry_timer.tick() => self.retry_sweep().await,
            }
        }
    }

    pub fn retry_queue(&self) -> &RetryQueue {
        &self.retry_queue
    }

    /// Classify a Secret notification and distribute it to every target namespace.
    ///
    /// Each namespace is attempted independently. The retry entry for the
    /// distributed name is cleared before the fan-out and re-added by any
    /// namespace that fails, so one success does not hide another failure.
    #[instrument(skip(self, secret), fields(secret = %secret.name_any()))]
    pub async fn handle_event(&mut self, action: SecretAction, secret: &Secret) {
        metrics::increment_events_received(action.as_str());
        let _timer = metrics::start_event_timer();

        let name = secret.name_any();
        debug!("action: {} for secret: {}", action, name);

        let target_name = derived_name(secret, &self.own_namespace);

        let Some(distribution) = classify(secret) else {
            debug!("{} - Missing label 'dist-namespace-x' for secret: {}", action, name);
            if self.retry_queue.remove(&target_name).is_some() {
                info!("Secret {} is no longer distributed, dropped pending retry", name);
            }
            return;
        };

        info!("{} - {} secret: {}", action, distribution.path, name);

        let distributed = build_for_path(distribution.path, secret, &self.own_namespace);
        self.retry_queue.remove(&target_name);

        for namespace in &distribution.namespaces {
            distribute_secret(
                &self.client,
                &mut self.retry_queue,
                action,
                namespace,
                &distributed,
                secret,
            )
            .await;
        }

        if distribution.path == DistributionPath::KafkaUser {
            for namespace in &distribution.namespaces {
                self.mirror_cluster_ca_cert(namespace).await;
            }
        }
    }

    /// Replay every queued failure through [`handle_event`](Self::handle_event).
    ///
    /// Replays redo classification and transformation from the stored source
    /// Secret rather than repeating the failed write, and they reach every
    /// target namespace of that Secret again, not only the one that failed.
    #[instrument(skip(self))]
    pub async fn retry_sweep(&mut self) {
        if self.retry_queue.is_empty() {
            return;
        }

        for entry in self.retry_queue.snapshot() {
            info!(
                "Retry action {} with secret {}",
                entry.action,
                entry.secret.name_any()
            );
            self.handle_event(entry.action, &entry.secret).await;
        }
    }

    /// Copy the Strimzi cluster CA certificate into `namespace`.
    ///
    /// Uses the CA Secret's own labels for the KafkaUser transform. A missing CA
    /// Secret is ignored, and failures are logged only: they never enter the
    /// retry queue.
    async fn mirror_cluster_ca_cert(&self, namespace: &str) {
        let ca_secret =
            match find_secret(&self.client, &self.own_namespace, CLUSTER_CA_CERT_SECRET).await {
                Ok(Some(s)) => s,
                Ok(None) => {
                    debug!(
                        "No {} secret in namespace {}",
                        CLUSTER_CA_CERT_SECRET, self.own_namespace
                    );
                    return;
                }
                Err(e) => {
                    warn!("Failed to look up {}: {}", CLUSTER_CA_CERT_SECRET, e);
                    return;
                }
            };

        let distributed = build_kafka_user_secret(&ca_secret, &self.own_namespace);
        let name = distributed.name_any();

        match create_or_replace(&self.client, namespace, &distributed).await {
            Ok(()) => info!("CA - secret: {} added in namespace: {}", name, namespace),
            Err(e) => warn!(
                "CA - secret: {} in namespace: {} failed: {}",
                name, namespace, e
            ),
        }
    }
}
