// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Warden authentication adapter.

use thiserror::Error;

use crate::types::{CallbackStage, TokenFault};

/// Boxed error carried as the `source` of wrapped failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type shared by the dispatcher, the claim engine, and the config layer.
///
/// Every failure upstream of an authorization decision is one of these
/// variants. None of them is ever collapsed into an `Ok(false)`.
#[derive(Debug, Error)]
pub enum WardenError {
    /// A required callback is absent.
    #[error("{what} is not configured")]
    NotConfigured { what: &'static str },

    /// A user-supplied callback returned an error. The original error is
    /// available through `source()`.
    #[error("{stage} callback failed: {source}")]
    CallbackFailed {
        stage: CallbackStage,
        source: BoxError,
    },

    /// Token issuance was requested without a signing key.
    #[error("no signing key is configured")]
    MissingSigningKey,

    /// Token verification was requested without a verification key.
    #[error("no verification key is configured")]
    MissingVerificationKey,

    /// The caller supplied no usable input (e.g. an empty token).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Signature, format, algorithm, or registered-claim check failed on decode.
    #[error("invalid token ({fault}): {source}")]
    InvalidToken { fault: TokenFault, source: BoxError },

    /// PEM key material could not be parsed or decrypted.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The JWT library failed to sign a payload.
    #[error("token signing failed: {source}")]
    Signing { source: BoxError },

    /// Configuration errors (invalid TOML, unreadable key files).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WardenError {
    /// True for failures caused by missing or invalid configuration.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            WardenError::NotConfigured { .. }
                | WardenError::MissingSigningKey
                | WardenError::MissingVerificationKey
                | WardenError::InvalidKey(_)
                | WardenError::Config(_)
        )
    }

    /// True when an inbound token was rejected.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(self, WardenError::InvalidToken { .. })
    }

    /// The fault category of a rejected token, if this is one.
    #[must_use]
    pub fn token_fault(&self) -> Option<TokenFault> {
        match self {
            WardenError::InvalidToken { fault, .. } => Some(*fault),
            _ => None,
        }
    }
}
