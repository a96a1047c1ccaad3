// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication adapter trait for token issuance and verification.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::WardenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Claims, IssuedToken};

/// Adapter that turns credentials into signed tokens and signed tokens into
/// authorization decisions.
#[async_trait]
pub trait AuthAdapter: PluginAdapter {
    /// Authenticates the credential and, when accepted, returns a signed token.
    ///
    /// Returns `Ok(None)` when the authenticator rejects the credential.
    async fn issue(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<Option<IssuedToken>, WardenError>;

    /// Verifies the token's signature and returns its payload.
    async fn decode(&self, token: &str) -> Result<Claims, WardenError>;

    /// Verifies the token and decides whether it satisfies `required`.
    async fn authorize_token(
        &self,
        token: &str,
        required: Option<&Claims>,
    ) -> Result<bool, WardenError>;
}
