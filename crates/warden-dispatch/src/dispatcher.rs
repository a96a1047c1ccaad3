// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatcher: holds the registered callbacks and the caller's context.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};
use warden_core::{AuthnOutcome, CallbackStage, ClaimMatcher, Claims, WardenError};

use crate::callback::Callback;
use crate::request::{AuthnCallback, AuthnRequest, AuthzCallback, AuthzRequest};

/// Invokes the configured authentication and authorization callbacks.
///
/// `C` is the caller's opaque context type (a connection pool, a repository
/// handle, ...). It is shared with every callback invocation through an
/// `Arc` and never looked at by the dispatcher.
pub struct Dispatcher<C = ()> {
    authn: Option<AuthnCallback<C>>,
    authz: Option<AuthzCallback<C>>,
    context: Arc<C>,
}

impl Dispatcher<()> {
    /// A dispatcher with no context and no callbacks.
    pub fn new() -> Self {
        Self::with_shared_context(Arc::new(()))
    }
}

impl Default for Dispatcher<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Dispatcher<C>
where
    C: Send + Sync + 'static,
{
    pub fn with_context(context: C) -> Self {
        Self::with_shared_context(Arc::new(context))
    }

    /// Use a context the caller already shares elsewhere.
    pub fn with_shared_context(context: Arc<C>) -> Self {
        Self {
            authn: None,
            authz: None,
            context,
        }
    }

    pub fn authn(mut self, callback: AuthnCallback<C>) -> Self {
        self.authn = Some(callback);
        self
    }

    pub fn authz(mut self, callback: AuthzCallback<C>) -> Self {
        self.authz = Some(callback);
        self
    }

    pub fn set_authn(&mut self, callback: AuthnCallback<C>) {
        self.authn = Some(callback);
    }

    pub fn clear_authn(&mut self) {
        self.authn = None;
    }

    pub fn set_authz(&mut self, callback: AuthzCallback<C>) {
        self.authz = Some(callback);
    }

    pub fn clear_authz(&mut self) {
        self.authz = None;
    }

    pub fn set_context(&mut self, context: Arc<C>) {
        self.context = context;
    }

    pub fn context(&self) -> &Arc<C> {
        &self.context
    }

    pub fn has_authn(&self) -> bool {
        self.authn.is_some()
    }

    pub fn has_authz(&self) -> bool {
        self.authz.is_some()
    }

    /// Run the authentication callback and return its result unmodified.
    ///
    /// # Errors
    ///
    /// - `WardenError::NotConfigured` if no authentication callback is set.
    /// - `WardenError::CallbackFailed` if the callback returns an error or panics.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<AuthnOutcome, WardenError> {
        let callback = self.authn.as_ref().ok_or(WardenError::NotConfigured {
            what: "authentication callback",
        })?;

        let request = AuthnRequest {
            context: Arc::clone(&self.context),
            identifier: identifier.to_string(),
            secret: SecretString::from(secret.expose_secret().to_string()),
        };

        debug!(identifier, mode = %callback.mode(), "dispatching authentication callback");
        dispatch(CallbackStage::Authentication, callback, request).await
    }

    /// Run the authorization callback and return its decision unmodified.
    ///
    /// # Errors
    ///
    /// - `WardenError::NotConfigured` if no authorization callback is set.
    /// - `WardenError::CallbackFailed` if the callback returns an error or panics.
    pub async fn authorize(
        &self,
        payload: Claims,
        required: Option<Claims>,
    ) -> Result<bool, WardenError> {
        let callback = self.authz.as_ref().ok_or(WardenError::NotConfigured {
            what: "authorization callback",
        })?;
        self.run_authz(callback, payload, required).await
    }

    /// Like [`Dispatcher::authorize`], but falls back to `fallback` instead of
    /// failing when no authorization callback is set.
    pub async fn authorize_or(
        &self,
        payload: Claims,
        required: Option<Claims>,
        fallback: &dyn ClaimMatcher,
    ) -> Result<bool, WardenError> {
        match &self.authz {
            Some(callback) => self.run_authz(callback, payload, required).await,
            None => {
                let authorized = fallback.matches(&payload, required.as_ref());
                debug!(authorized, "no authorization callback, used claim matcher");
                Ok(authorized)
            }
        }
    }

    async fn run_authz(
        &self,
        callback: &AuthzCallback<C>,
        payload: Claims,
        required: Option<Claims>,
    ) -> Result<bool, WardenError> {
        let request = AuthzRequest {
            context: Arc::clone(&self.context),
            payload,
            required,
        };

        debug!(mode = %callback.mode(), "dispatching authorization callback");
        dispatch(CallbackStage::Authorization, callback, request).await
    }
}

impl<C> std::fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("authn", &self.authn)
            .field("authz", &self.authz)
            .field("context", &"<opaque>")
            .finish()
    }
}

async fn dispatch<Req, Out>(
    stage: CallbackStage,
    callback: &Callback<Req, Out>,
    request: Req,
) -> Result<Out, WardenError>
where
    Req: Send + 'static,
    Out: Send + 'static,
{
    callback.invoke(request).await.map_err(|source| {
        warn!(%stage, error = %source, "callback failed");
        WardenError::CallbackFailed { stage, source }
    })
}
