// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the dispatcher and the claim engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// A JSON object of claims, used both for token payloads and required claim-sets.
pub type Claims = serde_json::Map<String, Value>;

/// What an authentication callback decided.
///
/// A callback either answers yes/no, or accepts the credential and names the
/// exact claims the issued token must carry.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthnOutcome {
    /// Plain accept (`true`) or reject (`false`).
    Decision(bool),
    /// Accepted; the map becomes the token payload verbatim.
    Claims(Claims),
}

impl AuthnOutcome {
    /// Whether the credential was accepted. A claim map always counts as accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            AuthnOutcome::Decision(accepted) => *accepted,
            AuthnOutcome::Claims(_) => true,
        }
    }
}

impl From<bool> for AuthnOutcome {
    fn from(accepted: bool) -> Self {
        AuthnOutcome::Decision(accepted)
    }
}

impl From<Claims> for AuthnOutcome {
    fn from(claims: Claims) -> Self {
        AuthnOutcome::Claims(claims)
    }
}

/// A freshly signed token together with the claims that were signed.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    /// The compact `header.payload.signature` form.
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Display for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

/// Which callback a dispatch belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CallbackStage {
    Authentication,
    Authorization,
}

/// Why an inbound token was rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TokenFault {
    /// `exp` is in the past (beyond leeway) or `nbf` is in the future.
    Expired,
    /// Signature does not verify against the configured key.
    BadSignature,
    /// Header declares an algorithm other than the configured one.
    Algorithm,
    /// Not three base64url segments, or the header/payload is not valid JSON.
    Malformed,
    /// A registered claim (`iss`, `aud`) did not match the expected value.
    Claim,
}

/// RSA-class signature algorithms accepted for issued and inbound tokens.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum TokenAlgorithm {
    #[default]
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
}

impl TokenAlgorithm {
    pub const ALL: [TokenAlgorithm; 6] = [
        TokenAlgorithm::RS256,
        TokenAlgorithm::RS384,
        TokenAlgorithm::RS512,
        TokenAlgorithm::PS256,
        TokenAlgorithm::PS384,
        TokenAlgorithm::PS512,
    ];
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but some capability is unavailable.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
