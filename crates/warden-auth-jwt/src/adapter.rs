// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `AuthAdapter` implementation for the claim engine.

use async_trait::async_trait;
use secrecy::SecretString;
use warden_core::{AuthAdapter, Claims, HealthStatus, IssuedToken, PluginAdapter, WardenError};

use crate::engine::ClaimEngine;

#[async_trait]
impl<C> PluginAdapter for ClaimEngine<C>
where
    C: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "jwt-claim-engine"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, WardenError> {
        let status = match (self.has_signing_key(), self.has_verification_key()) {
            (true, true) => HealthStatus::Healthy,
            (false, true) => HealthStatus::Degraded("no signing key: cannot issue".to_string()),
            (true, false) => {
                HealthStatus::Degraded("no verification key: cannot verify".to_string())
            }
            (false, false) => HealthStatus::Unhealthy("no key material configured".to_string()),
        };
        Ok(status)
    }
}

#[async_trait]
impl<C> AuthAdapter for ClaimEngine<C>
where
    C: Send + Sync + 'static,
{
    async fn issue(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<Option<IssuedToken>, WardenError> {
        ClaimEngine::issue(self, identifier, secret).await
    }

    async fn decode(&self, token: &str) -> Result<Claims, WardenError> {
        ClaimEngine::decode(self, token).await
    }

    async fn authorize_token(
        &self,
        token: &str,
        required: Option<&Claims>,
    ) -> Result<bool, WardenError> {
        ClaimEngine::authorize_token(self, token, required).await
    }
}

#[cfg(test)]
mod tests {
    use warden_test_utils::keys;

    use super::*;
    use crate::keys::{SigningKey, VerificationKey};

    #[tokio::test]
    async fn health_reflects_key_material() {
        let engine = ClaimEngine::new();
        assert!(matches!(
            engine.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));

        let engine = engine.signing_key(SigningKey::from_pem(keys::TEST_PRIVATE_KEY, None).unwrap());
        assert!(matches!(
            engine.health_check().await.unwrap(),
            HealthStatus::Degraded(ref m) if m.contains("verification")
        ));

        let engine =
            engine.verification_key(VerificationKey::from_pem(keys::TEST_PUBLIC_KEY).unwrap());
        assert_eq!(engine.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[test]
    fn adapter_name_and_version() {
        let engine = ClaimEngine::new();
        assert_eq!(engine.name(), "jwt-claim-engine");
        assert_eq!(engine.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let adapter: Box<dyn AuthAdapter> = Box::new(ClaimEngine::new());
        let err = adapter.decode("a.b.c").await.unwrap_err();
        assert!(matches!(err, WardenError::MissingVerificationKey));
    }
}
