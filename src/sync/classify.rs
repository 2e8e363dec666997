// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decides whether a Secret is distributed and where to.

use crate::constants::{labels, KAFKA_USER_KIND};
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeSet;
use std::fmt;

/// How a distributed Secret is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionPath {
    /// Plain copy with only the managed-by label
    Generic,
    /// Strimzi KafkaUser credentials, also pulls in the cluster CA certificate
    KafkaUser,
}

impl fmt::Display for DistributionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionPath::Generic => write!(f, "generic"),
            DistributionPath::KafkaUser => write!(f, "KafkaUser"),
        }
    }
}

/// Result of classifying an in-scope Secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub path: DistributionPath,
    /// Target namespaces, sorted and without duplicates
    pub namespaces: Vec<String>,
}

/// Classify a Secret. Returns `None` when it carries no usable `dist-namespace*` label.
pub fn classify(secret: &Secret) -> Option<Distribution> {
    if !has_dist_namespace_labels(secret) {
        return None;
    }

    // Labels whose values are all empty leave nothing to distribute to
    let namespaces = target_namespaces(secret);
    if namespaces.is_empty() {
        return None;
    }

    let path = if is_kafka_user_secret(secret) {
        DistributionPath::KafkaUser
    } else {
        DistributionPath::Generic
    };

    Some(Distribution { path, namespaces })
}

/// Check if a secret carries the `strimzi.io/kind=KafkaUser` marker
pub fn is_kafka_user_secret(secret: &Secret) -> bool {
    secret
        .metadata
        .labels
        .as_ref()
        .and_then(|l| l.get(labels::STRIMZI_KIND))
        .is_some_and(|v| v == KAFKA_USER_KIND)
}

/// Check if a secret has at least one label starting with `dist-namespace`
pub fn has_dist_namespace_labels(secret: &Secret) -> bool {
    secret
        .metadata
        .labels
        .as_ref()
        .is_some_and(|l| l.keys().any(|k| k.starts_with(labels::DIST_NAMESPACE_PREFIX)))
}

/// Values of all `dist-namespace*` labels. Empty values are skipped.
pub fn target_namespaces(secret: &Secret) -> Vec<String> {
    let Some(secret_labels) = secret.metadata.labels.as_ref() else {
        return Vec::new();
    };

    secret_labels
        .iter()
        .filter(|(k, v)| k.starts_with(labels::DIST_NAMESPACE_PREFIX) && !v.is_empty())
        .map(|(_, v)| v.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;
    use std::collections::BTreeMap;

    fn make_secret(labels: &[(&str, &str)]) -> Secret {
        Secret {
            metadata: ObjectMeta {
                name: Some("app-credentials".to_string()),
                namespace: Some("kafka".to_string()),
                labels: (!labels.is_empty()).then(|| {
                    labels
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<BTreeMap<_, _>>()
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_labels_is_out_of_scope() {
        let secret = make_secret(&[]);

        assert!(!has_dist_namespace_labels(&secret));
        assert_eq!(classify(&secret), None);
    }

    #[test]
    fn test_other_labels_are_out_of_scope() {
        let secret = make_secret(&[
            (labels::STRIMZI_KIND, KAFKA_USER_KIND),
            (labels::STRIMZI_CLUSTER, "my-cluster"),
            ("app", "orders"),
        ]);

        assert_eq!(classify(&secret), None);
    }

    #[test]
    fn test_generic_path() {
        let secret = make_secret(&[("dist-namespace-a", "ns1"), ("dist-namespace-b", "ns2")]);

        let distribution = classify(&secret).unwrap();
        assert_eq!(distribution.path, DistributionPath::Generic);
        assert_eq!(distribution.namespaces, vec!["ns1", "ns2"]);
    }

    #[test]
    fn test_kafka_user_path() {
        let secret = make_secret(&[
            (labels::STRIMZI_KIND, KAFKA_USER_KIND),
            (labels::STRIMZI_CLUSTER, "my-cluster"),
            ("dist-namespace-a", "ns1"),
        ]);

        let distribution = classify(&secret).unwrap();
        assert_eq!(distribution.path, DistributionPath::KafkaUser);
        assert_eq!(distribution.namespaces, vec!["ns1"]);
    }

    #[test]
    fn test_other_strimzi_kind_is_generic() {
        let secret = make_secret(&[(labels::STRIMZI_KIND, "Kafka"), ("dist-namespace", "ns1")]);

        assert_eq!(classify(&secret).unwrap().path, DistributionPath::Generic);
    }

    #[test]
    fn test_bare_prefix_and_arbitrary_suffixes() {
        let secret = make_secret(&[
            ("dist-namespace", "ns3"),
            ("dist-namespace.team", "ns1"),
            ("dist-namespace-2", "ns2"),
            ("namespace-dist", "ignored"),
        ]);

        assert_eq!(target_namespaces(&secret), vec!["ns1", "ns2", "ns3"]);
    }

    #[test]
    fn test_duplicate_and_empty_targets() {
        let secret = make_secret(&[
            ("dist-namespace-a", "ns1"),
            ("dist-namespace-b", "ns1"),
            ("dist-namespace-c", ""),
        ]);

        assert_eq!(target_namespaces(&secret), vec!["ns1"]);
    }

    #[test]
    fn test_only_empty_targets_is_out_of_scope() {
        let secret = make_secret(&[("dist-namespace-a", "")]);

        assert!(has_dist_namespace_labels(&secret));
        assert_eq!(classify(&secret), None);
    }
}
