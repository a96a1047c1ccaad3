// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arguments handed to user callbacks.

use std::sync::Arc;

use secrecy::SecretString;
use warden_core::{AuthnOutcome, Claims};

use crate::callback::Callback;

/// Callback deciding whether a credential is valid.
pub type AuthnCallback<C> = Callback<AuthnRequest<C>, AuthnOutcome>;

/// Callback deciding whether a verified payload is authorized.
pub type AuthzCallback<C> = Callback<AuthzRequest<C>, bool>;

/// Input to an authentication callback.
pub struct AuthnRequest<C> {
    /// The caller's opaque handle, shared with the adapter.
    pub context: Arc<C>,
    pub identifier: String,
    pub secret: SecretString,
}

/// Input to an authorization callback.
pub struct AuthzRequest<C> {
    /// The caller's opaque handle, shared with the adapter.
    pub context: Arc<C>,
    /// The verified token payload.
    pub payload: Claims,
    /// The claim-set the caller requires, if any.
    pub required: Option<Claims>,
}

// The context is never inspected, so Debug must not require `C: Debug`.
impl<C> std::fmt::Debug for AuthnRequest<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthnRequest")
            .field("context", &"<opaque>")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl<C> std::fmt::Debug for AuthzRequest<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthzRequest")
            .field("context", &"<opaque>")
            .field("payload", &self.payload)
            .field("required", &self.required)
            .finish()
    }
}
