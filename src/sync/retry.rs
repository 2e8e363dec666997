// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Failed distributions waiting for the next retry sweep.

use crate::metrics;
use crate::sync::manager::SecretAction;
use k8s_openapi::api::core::v1::Secret;
use std::collections::HashMap;

/// A failed distribution: the action and the source Secret as it was when the write failed
#[derive(Debug, Clone)]
pub struct RetryEntry {
    pub action: SecretAction,
    pub secret: Secret,
}

/// Retry entries keyed by the distributed Secret name.
///
/// Holds at most one entry per name; inserting again replaces the earlier failure.
/// Owned by the sync manager task, so live notifications and retry sweeps never
/// touch it concurrently.
#[derive(Debug, Default)]
pub struct RetryQueue {
    entries: HashMap<String, RetryEntry>,
}

impl RetryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a failure, returning the entry it replaced
    pub fn insert(&mut self, name: String, entry: RetryEntry) -> Option<RetryEntry> {
        let previous = self.entries.insert(name, entry);
        metrics::set_retry_queue_size(self.entries.len());
        previous
    }

    pub fn remove(&mut self, name: &str) -> Option<RetryEntry> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            metrics::set_retry_queue_size(self.entries.len());
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&RetryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the current entries, so a sweep can replay them while the queue is modified
    pub fn snapshot(&self) -> Vec<RetryEntry> {
        self.entries.values().cloned().collect()
    }
}
