// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{bail, Context, Result};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interval between sweeps of the retry queue
    pub retry_interval: Duration,
    /// Namespace to watch for source Secrets. Falls back to the client's default namespace.
    pub watch_namespace: Option<String>,
    /// Listen address of the health and metrics server
    pub health_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let retry_interval_secs = match lookup("RETRY_INTERVAL_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("RETRY_INTERVAL_SECS is not a number: {}", v))?,
            None => defaults::RETRY_INTERVAL_SECS,
        };
        if retry_interval_secs == 0 {
            bail!("RETRY_INTERVAL_SECS must be greater than 0");
        }

        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty());

        let health_addr =
            lookup("HEALTH_ADDR").unwrap_or_else(|| defaults::HEALTH_ADDR.to_string());
        let health_addr = health_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("HEALTH_ADDR is not a socket address: {}", health_addr))?;

        Ok(Config {
            retry_interval: Duration::from_secs(retry_interval_secs),
            watch_namespace,
            health_addr,
        })
    }
}
