// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all Warden adapters implement.

use async_trait::async_trait;

use crate::error::WardenError;
use crate::types::HealthStatus;

/// Identity and health reporting for an adapter instance.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Reports whether the adapter can currently issue and verify tokens.
    async fn health_check(&self) -> Result<HealthStatus, WardenError>;
}
