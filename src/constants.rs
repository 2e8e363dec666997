// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label keys read from source Secrets and written to distributed copies
pub mod labels {
    /// Every label whose key starts with this prefix names a target namespace
    pub const DIST_NAMESPACE_PREFIX: &str = "dist-namespace";
    /// Strimzi marker for the kind of resource a Secret was issued for
    pub const STRIMZI_KIND: &str = "strimzi.io/kind";
    /// Strimzi label naming the Kafka cluster a Secret belongs to
    pub const STRIMZI_CLUSTER: &str = "strimzi.io/cluster";
    pub const MANAGED_BY: &str = "app.kubernetes.io/managed-by";
}

/// Value of `strimzi.io/kind` on Secrets issued for a KafkaUser
pub const KAFKA_USER_KIND: &str = "KafkaUser";

/// The operator name, used as managed-by value and server-side apply field manager
pub const OPERATOR_NAME: &str = "kube-secret-watcher";

/// API version put on owner references of distributed Secrets
pub const OWNER_API_VERSION: &str = "kube-secret-watcher/v1alpha1";

/// Name of the Strimzi cluster CA certificate Secret mirrored next to KafkaUser Secrets
pub const CLUSTER_CA_CERT_SECRET: &str = "kafka-cluster-ca-cert";

/// Name used for a distributed Secret when the source has no name
pub const UNKNOWN_SECRET_NAME: &str = "unknown-secret-name";

/// Defaults for the environment based configuration
pub mod defaults {
    pub const RETRY_INTERVAL_SECS: u64 = 30;
    pub const HEALTH_ADDR: &str = "0.0.0.0:8080";
    /// Capacity of the channel between the Secret watch and the sync manager
    pub const EVENT_CHANNEL_CAPACITY: usize = 256;
}
