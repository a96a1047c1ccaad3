// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Warden adapter.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use warden_core::{TokenAlgorithm, WardenError};

/// Top-level Warden configuration.
///
/// Every section is optional and defaults to an engine with no keys,
/// RS256 signing, and `info` logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WardenConfig {
    /// Signing and verification key material.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Token issuance and validation settings.
    #[serde(default)]
    pub token: TokenConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Key material, inline or by file path.
///
/// Inline PEM and the `_file` form of the same key are mutually exclusive.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeysConfig {
    /// PEM private key used to sign tokens.
    #[serde(default)]
    pub signing_key: Option<String>,

    /// Path to a PEM private key file.
    #[serde(default)]
    pub signing_key_file: Option<PathBuf>,

    /// Passphrase for an encrypted PKCS#8 signing key. Never serialized.
    #[serde(default, skip_serializing)]
    pub key_passphrase: Option<SecretString>,

    /// PEM public key used to verify tokens.
    #[serde(default)]
    pub verification_key: Option<String>,

    /// Path to a PEM public key file.
    #[serde(default)]
    pub verification_key_file: Option<PathBuf>,
}

impl KeysConfig {
    /// The signing key PEM, read from disk if configured by path.
    pub fn signing_key_pem(&self) -> Result<Option<String>, WardenError> {
        resolve_pem(self.signing_key.as_deref(), self.signing_key_file.as_ref())
    }

    /// The verification key PEM, read from disk if configured by path.
    pub fn verification_key_pem(&self) -> Result<Option<String>, WardenError> {
        resolve_pem(
            self.verification_key.as_deref(),
            self.verification_key_file.as_ref(),
        )
    }

    pub fn passphrase(&self) -> Option<SecretString> {
        self.key_passphrase.clone()
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing_key.is_some() || self.signing_key_file.is_some()
    }

    pub fn has_verification_key(&self) -> bool {
        self.verification_key.is_some() || self.verification_key_file.is_some()
    }
}

impl std::fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeysConfig")
            .field("signing_key", &self.signing_key.as_ref().map(|_| "[REDACTED]"))
            .field("signing_key_file", &self.signing_key_file)
            .field(
                "key_passphrase",
                &self.key_passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .field("verification_key", &self.verification_key.is_some())
            .field("verification_key_file", &self.verification_key_file)
            .finish()
    }
}

fn resolve_pem(
    inline: Option<&str>,
    file: Option<&PathBuf>,
) -> Result<Option<String>, WardenError> {
    match (inline, file) {
        (Some(_), Some(path)) => Err(WardenError::Config(format!(
            "key given both inline and as file `{}`",
            path.display()
        ))),
        (Some(pem), None) => Ok(Some(pem.to_string())),
        (None, Some(path)) => std::fs::read_to_string(path).map(Some).map_err(|e| {
            WardenError::Config(format!("failed to read key file `{}`: {e}", path.display()))
        }),
        (None, None) => Ok(None),
    }
}

/// Token issuance and validation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    /// Signing algorithm (RS256, RS384, RS512, PS256, PS384, PS512).
    #[serde(default)]
    pub algorithm: TokenAlgorithm,

    /// Key ID written to the token header.
    #[serde(default)]
    pub key_id: Option<String>,

    /// Lifetime of policy-built tokens in seconds. `None` issues tokens without `exp`.
    #[serde(default)]
    pub ttl_secs: Option<u64>,

    /// Issuer stamped into policy-built tokens and required on decode.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Audiences required on decode. Empty disables the audience check.
    #[serde(default)]
    pub audience: Vec<String>,

    /// Clock skew tolerance for `exp`/`nbf`.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            algorithm: TokenAlgorithm::default(),
            key_id: None,
            ttl_secs: None,
            issuer: None,
            audience: Vec::new(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

fn default_leeway_secs() -> u64 {
    60
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
