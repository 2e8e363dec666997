// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Writes a distributed Secret into one target namespace

use crate::kubernetes::{create_or_replace, delete_secret};
use crate::metrics;
use crate::sync::manager::SecretAction;
use crate::sync::retry::{RetryEntry, RetryQueue};
use k8s_openapi::api::core::v1::Secret;
use kube::{Client, ResourceExt};
use tracing::{info, instrument, warn};

/// Apply `action` for `secret` in `namespace`.
///
/// A failed write is logged and stored in the retry queue under the distributed
/// Secret's name together with `original`, so the retry sweep can replay the
/// whole notification. Returns whether the write succeeded.
#[instrument(
    skip(client, retry_queue, secret, original),
    fields(secret = %secret.name_any())
)]
pub async fn distribute_secret(
    client: &Client,
    retry_queue: &mut RetryQueue,
    action: SecretAction,
    namespace: &str,
    secret: &Secret,
    original: &Secret,
) -> bool {
    let name = secret.name_any();

    let result = match action {
        SecretAction::Added | SecretAction::Modified => {
            create_or_replace(client, namespace, secret).await
        }
        SecretAction::Deleted => delete_secret(client, namespace, &name).await,
        SecretAction::Error => {
            info!("Unknown action {} for secret {}, ignoring", action, name);
            return true;
        }
    };

    match result {
        Ok(()) => {
            info!("{} - secret: {} in namespace: {}", action, name, namespace);
            true
        }
        Err(e) => {
            warn!(
                "{} - secret: {} in namespace: {} failed, queued for retry: {}",
                action, name, namespace, e
            );
            metrics::increment_distribution_failures();
            retry_queue.insert(
                name,
                RetryEntry {
                    action,
                    secret: original.clone(),
                },
            );
            false
        }
    }
}
