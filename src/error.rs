// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Secret watch failed: {0}")]
    WatchError(#[from] kube_runtime::watcher::Error),

    #[error("Secret watch stream closed")]
    WatchClosed,
}

pub type Result<T> = std::result::Result<T, WatcherError>;
