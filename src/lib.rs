// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod health;
pub mod kubernetes;
pub mod metrics;
pub mod sync;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_utils;
