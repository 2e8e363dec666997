// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret watch - turns watcher events into notifications for the sync manager.

use crate::error::WatcherError;
use crate::sync::{SecretAction, SecretEvent, SyncManagerHandle};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use kube_runtime::watcher;
use tracing::{debug, error, info};

pub struct SecretWatch {
    client: Client,
    namespace: String,
    sync_handle: SyncManagerHandle,
}

impl SecretWatch {
    pub fn new(client: Client, namespace: String, sync_handle: SyncManagerHandle) -> Self {
        Self {
            client,
            namespace,
            sync_handle,
        }
    }

    /// Forward Secret changes in the watched namespace until the watch fails.
    ///
    /// There is no reconnect: any watch error, or the stream ending, is returned
    /// so the process can exit.
    pub async fn run(self) -> anyhow::Result<()> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &self.namespace);
        let stream = watcher::watcher(secrets, watcher::Config::default());
        tokio::pin!(stream);

        info!("Watching Secrets in namespace {}", self.namespace);

        while let Some(event) = stream.next().await {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    error!("Secret watch failed: {}", e);
                    return Err(WatcherError::from(e).into());
                }
            };

            if let Some(event) = to_secret_event(event) {
                self.sync_handle.send(event).await;
            }
        }

        error!("Secret watch stream closed");
        Err(WatcherError::WatchClosed.into())
    }
}

/// Map a watcher event onto a Secret notification.
///
/// The watcher does not tell creations from updates after the initial listing,
/// so `Apply` is reported as MODIFIED. Both lead to the same create-or-replace.
pub fn to_secret_event(event: watcher::Event<Secret>) -> Option<SecretEvent> {
    let (action, secret) = match event {
        watcher::Event::InitApply(secret) => (SecretAction::Added, secret),
        watcher::Event::Apply(secret) => (SecretAction::Modified, secret),
        watcher::Event::Delete(secret) => (SecretAction::Deleted, secret),
        watcher::Event::Init | watcher::Event::InitDone => {
            debug!("Secret watch (re)listing");
            return None;
        }
    };

    Some(SecretEvent { action, secret })
}
