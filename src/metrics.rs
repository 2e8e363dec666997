// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics for the watcher.
//!
//! - `secret_watcher_events_received_total{action}` - Secret notifications handled, including retries
//! - `secret_watcher_event_duration_seconds` - Time spent handling one notification
//! - `secret_watcher_distribution_failures_total` - Failed writes into target namespaces
//! - `secret_watcher_retry_queue_size` - Entries currently waiting for the next retry sweep

use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, HistogramTimer, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static EVENTS_RECEIVED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "secret_watcher_events_received_total",
            "Total number of Secret notifications handled",
        ),
        &["action"],
    )
    .expect("Failed to create EVENTS_RECEIVED_TOTAL metric - this should never happen")
});

static EVENT_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "secret_watcher_event_duration_seconds",
            "Duration of handling one Secret notification in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]),
    )
    .expect("Failed to create EVENT_DURATION metric - this should never happen")
});

static DISTRIBUTION_FAILURES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "secret_watcher_distribution_failures_total",
        "Total number of failed writes into target namespaces",
    )
    .expect("Failed to create DISTRIBUTION_FAILURES_TOTAL metric - this should never happen")
});

static RETRY_QUEUE_SIZE: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new(
        "secret_watcher_retry_queue_size",
        "Number of Secrets waiting for the next retry sweep",
    )
    .expect("Failed to create RETRY_QUEUE_SIZE metric - this should never happen")
});

pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(EVENTS_RECEIVED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(EVENT_DURATION.clone()))?;
    REGISTRY.register(Box::new(DISTRIBUTION_FAILURES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RETRY_QUEUE_SIZE.clone()))?;

    Ok(())
}

pub fn increment_events_received(action: &str) {
    EVENTS_RECEIVED_TOTAL.with_label_values(&[action]).inc();
}

/// Observes the elapsed time when the returned timer is dropped
pub fn start_event_timer() -> HistogramTimer {
    EVENT_DURATION.start_timer()
}

pub fn increment_distribution_failures() {
    DISTRIBUTION_FAILURES_TOTAL.inc();
}

pub fn set_retry_queue_size(size: usize) {
    RETRY_QUEUE_SIZE.set(i64::try_from(size).unwrap_or(i64::MAX));
}
