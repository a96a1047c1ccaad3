// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token issuance and validation settings.

use std::time::Duration;

use warden_core::TokenAlgorithm;

/// Default clock skew tolerance for `exp`/`nbf`, in seconds.
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

/// How tokens are signed and what is checked on decode.
///
/// The defaults sign with RS256 and add nothing to the payload, so a decoded
/// token equals exactly the claims that were issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// Signing algorithm. Decode accepts this algorithm only.
    pub algorithm: TokenAlgorithm,
    /// Written to the `kid` header when set.
    pub key_id: Option<String>,
    /// Lifetime stamped as `iat`/`exp` into policy-built payloads.
    pub ttl: Option<Duration>,
    /// Stamped as `iss` into policy-built payloads and required on decode.
    pub issuer: Option<String>,
    /// Required `aud` values on decode.
    pub audience: Option<Vec<String>>,
    /// Clock skew tolerance for `exp`/`nbf`.
    pub leeway_secs: u64,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            algorithm: TokenAlgorithm::default(),
            key_id: None,
            ttl: None,
            issuer: None,
            audience: None,
            leeway_secs: DEFAULT_LEEWAY_SECS,
        }
    }
}

impl TokenSettings {
    #[must_use]
    pub fn algorithm(mut self, algorithm: TokenAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    #[must_use]
    pub fn audience(mut self, aud: Vec<impl Into<String>>) -> Self {
        self.audience = Some(aud.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn leeway_secs(mut self, leeway: u64) -> Self {
        self.leeway_secs = leeway;
        self
    }
}

impl From<&warden_config::model::TokenConfig> for TokenSettings {
    fn from(config: &warden_config::model::TokenConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            key_id: config.key_id.clone(),
            ttl: config.ttl_secs.map(Duration::from_secs),
            issuer: config.issuer.clone(),
            audience: (!config.audience.is_empty()).then(|| config.audience.clone()),
            leeway_secs: config.leeway_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_add_nothing() {
        let settings = TokenSettings::default();
        assert_eq!(settings.algorithm, TokenAlgorithm::RS256);
        assert!(settings.key_id.is_none());
        assert!(settings.ttl.is_none());
        assert!(settings.issuer.is_none());
        assert!(settings.audience.is_none());
        assert_eq!(settings.leeway_secs, 60);
    }

    #[test]
    fn builder_methods_chain() {
        let settings = TokenSettings::default()
            .algorithm(TokenAlgorithm::PS512)
            .key_id("key-1")
            .ttl(Duration::from_secs(900))
            .issuer("warden")
            .audience(vec!["api"])
            .leeway_secs(5);
        assert_eq!(settings.algorithm, TokenAlgorithm::PS512);
        assert_eq!(settings.key_id.as_deref(), Some("key-1"));
        assert_eq!(settings.ttl, Some(Duration::from_secs(900)));
        assert_eq!(settings.issuer.as_deref(), Some("warden"));
        assert_eq!(settings.audience, Some(vec!["api".to_string()]));
        assert_eq!(settings.leeway_secs, 5);
    }

    #[test]
    fn from_config_maps_every_field() {
        let config = warden_config::model::TokenConfig {
            algorithm: TokenAlgorithm::RS384,
            key_id: Some("k".into()),
            ttl_secs: Some(60),
            issuer: Some("iss".into()),
            audience: vec![],
            leeway_secs: 10,
        };
        let settings = TokenSettings::from(&config);
        assert_eq!(settings.algorithm, TokenAlgorithm::RS384);
        assert_eq!(settings.ttl, Some(Duration::from_secs(60)));
        assert!(settings.audience.is_none());
        assert_eq!(settings.leeway_secs, 10);
    }
}
