// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builds the Secrets written into target namespaces

use crate::constants::{
    labels, KAFKA_USER_KIND, OPERATOR_NAME, OWNER_API_VERSION, UNKNOWN_SECRET_NAME,
};
use crate::sync::classify::DistributionPath;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use k8s_openapi::Resource;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// Name of the distributed copy: the watched namespace joined with the source name
pub fn derived_name(source: &Secret, own_namespace: &str) -> String {
    match source.metadata.name.as_deref() {
        Some(name) => format!("{}-{}", own_namespace, name),
        None => UNKNOWN_SECRET_NAME.to_string(),
    }
}

/// Build the distributed Secret for the given path
pub fn build_for_path(path: DistributionPath, source: &Secret, own_namespace: &str) -> Secret {
    match path {
        DistributionPath::Generic => build_distribution_secret(source, own_namespace),
        DistributionPath::KafkaUser => build_kafka_user_secret(source, own_namespace),
    }
}

/// Plain copy carrying only the managed-by label
pub fn build_distribution_secret(source: &Secret, own_namespace: &str) -> Secret {
    build(source, own_namespace, BTreeMap::new())
}

/// Copy that keeps the Strimzi cluster association.
///
/// The labels come from `source` itself, so when mirroring the cluster CA
/// certificate they are the CA Secret's labels, not the KafkaUser's.
pub fn build_kafka_user_secret(source: &Secret, own_namespace: &str) -> Secret {
    let mut extra = BTreeMap::new();
    if let Some(source_labels) = source.metadata.labels.as_ref().filter(|l| !l.is_empty()) {
        if let Some(cluster) = source_labels.get(labels::STRIMZI_CLUSTER) {
            extra.insert(labels::STRIMZI_CLUSTER.to_string(), cluster.clone());
        }
        extra.insert(labels::STRIMZI_KIND.to_string(), KAFKA_USER_KIND.to_string());
    }
    build(source, own_namespace, extra)
}

fn build(
    source: &Secret,
    own_namespace: &str,
    mut secret_labels: BTreeMap<String, String>,
) -> Secret {
    secret_labels.insert(labels::MANAGED_BY.to_string(), OPERATOR_NAME.to_string());

    let name = derived_name(source, own_namespace);
    let owner = owner_reference(source, &name);

    Secret {
        metadata: ObjectMeta {
            name: Some(name),
            labels: Some(secret_labels),
            owner_references: Some(vec![owner]),
            ..Default::default()
        },
        data: source.data.clone(),
        ..Default::default()
    }
}

/// Reference back to the distributed Secret itself. `controller: false` keeps the
/// garbage collector from tying its lifecycle to any parent.
fn owner_reference(source: &Secret, name: &str) -> OwnerReference {
    OwnerReference {
        api_version: OWNER_API_VERSION.to_string(),
        kind: Secret::KIND.to_string(),
        name: name.to_string(),
        uid: source.metadata.uid.clone().unwrap_or_default(),
        controller: Some(false),
        block_owner_deletion: None,
    }
}
