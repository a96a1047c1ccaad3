// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Swappable policies used by the claim engine.

use secrecy::SecretString;

use crate::types::Claims;

/// Decides whether a verified payload satisfies a required claim-set.
///
/// Used whenever no authorization callback is configured.
pub trait ClaimMatcher: Send + Sync {
    fn matches(&self, payload: &Claims, required: Option<&Claims>) -> bool;
}

/// Builds the token payload when the authentication callback answers with a
/// plain `true` instead of a claim map.
pub trait PayloadPolicy: Send + Sync {
    fn payload(&self, identifier: &str, secret: &SecretString) -> Claims;
}

impl<F> ClaimMatcher for F
where
    F: Fn(&Claims, Option<&Claims>) -> bool + Send + Sync,
{
    fn matches(&self, payload: &Claims, required: Option<&Claims>) -> bool {
        self(payload, required)
    }
}
