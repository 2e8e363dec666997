// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret classification, transformation and distribution.

pub mod classify;
pub mod distribute;
pub mod manager;
pub mod retry;
pub mod transform;

pub use classify::{classify, Distribution, DistributionPath};
pub use manager::{SecretAction, SecretEvent, SyncManager, SyncManagerHandle};
pub use retry::{RetryEntry, RetryQueue};
