// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Probe and metrics endpoints.
//!
//! - `/healthz` - liveness, always 200
//! - `/readyz` - 200 when the Kubernetes client has a bearer token, 503 otherwise
//! - `/metrics` - Prometheus text format

use crate::metrics::REGISTRY;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct HealthState {
    kube_config: Arc<kube::Config>,
}

impl HealthState {
    pub fn new(kube_config: kube::Config) -> Self {
        Self {
            kube_config: Arc::new(kube_config),
        }
    }
}

/// Whether the client configuration carries credentials, inline or as a
/// service account token file
pub fn has_credentials(config: &kube::Config) -> bool {
    config.auth_info.token.is_some() || config.auth_info.token_file.is_some()
}

pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: HealthState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Health server listening on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn readyz_handler(State(state): State<HealthState>) -> impl IntoResponse {
    if has_credentials(&state.kube_config) {
        (StatusCode::OK, "kube-secret-watcher is ready")
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "kube-secret-watcher is not ready. Token is missing. Have you configured a ServiceAccount?",
        )
    }
}

async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            format!("Failed to encode metrics: {}", e).into_bytes(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
}
