// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret writes and lookups against the Kubernetes API

use crate::constants::OPERATOR_NAME;
use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{DeleteParams, ListParams, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// Create the Secret in `namespace`, or overwrite it if it exists.
///
/// Uses a forced server-side apply without a resourceVersion, so the last write wins.
#[instrument(skip(client, secret), fields(secret = %secret.name_any()))]
pub async fn create_or_replace(client: &Client, namespace: &str, secret: &Secret) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let pp = PatchParams::apply(OPERATOR_NAME).force();

    secrets
        .patch(&secret.name_any(), &pp, &Patch::Apply(secret))
        .await?;

    Ok(())
}

/// Delete a Secret by name. A Secret that is already gone is not an error.
#[instrument(skip(client))]
pub async fn delete_secret(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    match secrets.delete(name, &DeleteParams::default()).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Secret {}/{} already deleted", namespace, name);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Scan all Secrets in `namespace` and return the first one called `name`
#[instrument(skip(client))]
pub async fn find_secret(client: &Client, namespace: &str, name: &str) -> Result<Option<Secret>> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let secret_list = secrets.list(&ListParams::default()).await?;

    Ok(secret_list
        .items
        .into_iter()
        .find(|s| s.metadata.name.as_deref() == Some(name)))
}
