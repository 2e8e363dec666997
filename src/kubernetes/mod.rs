// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes API access for Secrets.

pub mod secrets;

pub use secrets::{create_or_replace, delete_secret, find_secret};
