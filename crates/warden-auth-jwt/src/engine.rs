// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The claim engine: credentials to signed tokens, signed tokens to decisions.

use std::sync::Arc;

use jsonwebtoken::get_current_timestamp;
use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, info, warn};
use warden_config::WardenConfig;
use warden_core::{AuthnOutcome, ClaimMatcher, Claims, IssuedToken, PayloadPolicy, WardenError};
use warden_dispatch::{AuthnCallback, AuthzCallback, Dispatcher};

use crate::codec;
use crate::keys::{SigningKey, VerificationKey};
use crate::matcher::ExactMatch;
use crate::policy::EchoCredentials;
use crate::settings::TokenSettings;

/// A configured adapter instance.
///
/// Holds the callbacks (through a [`Dispatcher`]), the caller's context, the
/// key pair, and the policies used when no callback decides. Keys and
/// policies belong to the instance, so independently configured engines can
/// coexist in one process.
pub struct ClaimEngine<C = ()> {
    dispatcher: Dispatcher<C>,
    signing_key: Option<SigningKey>,
    verification_key: Option<VerificationKey>,
    settings: TokenSettings,
    matcher: Arc<dyn ClaimMatcher>,
    payload_policy: Arc<dyn PayloadPolicy>,
}

impl ClaimEngine<()> {
    /// An engine with no context, callbacks, or keys.
    pub fn new() -> Self {
        Self::from_dispatcher(Dispatcher::new())
    }

    /// Load keys and token settings from configuration.
    ///
    /// Callbacks are code, not configuration; register them afterwards.
    pub fn from_config(config: &WardenConfig) -> Result<Self, WardenError> {
        Self::new().configure(config)
    }
}

impl Default for ClaimEngine<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClaimEngine<C>
where
    C: Send + Sync + 'static,
{
    pub fn with_context(context: C) -> Self {
        Self::from_dispatcher(Dispatcher::with_context(context))
    }

    pub fn from_dispatcher(dispatcher: Dispatcher<C>) -> Self {
        Self {
            dispatcher,
            signing_key: None,
            verification_key: None,
            settings: TokenSettings::default(),
            matcher: Arc::new(ExactMatch),
            payload_policy: Arc::new(EchoCredentials),
        }
    }

    /// Apply the `[keys]` and `[token]` sections of `config`.
    pub fn configure(mut self, config: &WardenConfig) -> Result<Self, WardenError> {
        if let Some(pem) = config.keys.signing_key_pem()? {
            let passphrase = config.keys.passphrase();
            self.signing_key = Some(SigningKey::from_pem(&pem, passphrase.as_ref())?);
        }
        if let Some(pem) = config.keys.verification_key_pem()? {
            self.verification_key = Some(VerificationKey::from_pem(&pem)?);
        }
        self.settings = TokenSettings::from(&config.token);
        debug!(
            signing_key = self.signing_key.is_some(),
            verification_key = self.verification_key.is_some(),
            algorithm = %self.settings.algorithm,
            "claim engine configured"
        );
        Ok(self)
    }

    pub fn authn(mut self, callback: AuthnCallback<C>) -> Self {
        self.dispatcher.set_authn(callback);
        self
    }

    pub fn authz(mut self, callback: AuthzCallback<C>) -> Self {
        self.dispatcher.set_authz(callback);
        self
    }

    pub fn signing_key(mut self, key: SigningKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    pub fn verification_key(mut self, key: VerificationKey) -> Self {
        self.verification_key = Some(key);
        self
    }

    pub fn settings(mut self, settings: TokenSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn matcher(mut self, matcher: impl ClaimMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    pub fn payload_policy(mut self, policy: impl PayloadPolicy + 'static) -> Self {
        self.payload_policy = Arc::new(policy);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    /// Reconfigure callbacks or context between uses.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<C> {
        &mut self.dispatcher
    }

    pub fn set_signing_key(&mut self, key: Option<SigningKey>) {
        self.signing_key = key;
    }

    pub fn set_verification_key(&mut self, key: Option<VerificationKey>) {
        self.verification_key = key;
    }

    pub fn set_settings(&mut self, settings: TokenSettings) {
        self.settings = settings;
    }

    pub fn token_settings(&self) -> &TokenSettings {
        &self.settings
    }

    pub fn has_signing_key(&self) -> bool {
        self.signing_key.is_some()
    }

    pub fn has_verification_key(&self) -> bool {
        self.verification_key.is_some()
    }

    /// Authenticate the credential and sign a token for it.
    ///
    /// The payload is the callback's claim map when it returns one, otherwise
    /// whatever the payload policy builds (by default `{"id", "secret"}`).
    /// Returns `Ok(None)` when the callback rejects the credential.
    ///
    /// # Errors
    ///
    /// - `WardenError::MissingSigningKey` before any callback runs.
    /// - Any error from [`Dispatcher::authenticate`].
    /// - `WardenError::InvalidInput` if a callback claim map lacks the `iss`
    ///   or `aud` this engine requires on decode. Callback maps are signed
    ///   verbatim, so they must carry those claims themselves.
    /// - `WardenError::Signing` if the JWT library fails to sign.
    pub async fn issue(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<Option<IssuedToken>, WardenError> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(WardenError::MissingSigningKey)?;

        let claims = match self.dispatcher.authenticate(identifier, secret).await? {
            AuthnOutcome::Claims(claims) => {
                self.check_registered(&claims)?;
                claims
            }
            AuthnOutcome::Decision(true) => {
                self.stamp(self.payload_policy.payload(identifier, secret))
            }
            AuthnOutcome::Decision(false) => {
                info!(identifier, "credential rejected, no token issued");
                return Ok(None);
            }
        };

        let token = codec::encode_claims(&claims, key, &self.settings)?;
        info!(
            identifier,
            algorithm = %self.settings.algorithm,
            claims = claims.len(),
            "token issued"
        );
        Ok(Some(IssuedToken { token, claims }))
    }

    /// Verify a token's signature and return its payload.
    ///
    /// Verification runs on the blocking thread pool and completes before
    /// this returns.
    ///
    /// # Errors
    ///
    /// - `WardenError::InvalidInput` for an empty token.
    /// - `WardenError::MissingVerificationKey` if no key is configured.
    /// - `WardenError::InvalidToken` for any signature, format, algorithm,
    ///   expiry, or registered-claim failure.
    pub async fn decode(&self, token: &str) -> Result<Claims, WardenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(WardenError::InvalidInput("no token supplied".to_string()));
        }
        let key = self
            .verification_key
            .clone()
            .ok_or(WardenError::MissingVerificationKey)?;

        let settings = self.settings.clone();
        let token = token.to_string();
        let result =
            tokio::task::spawn_blocking(move || codec::decode_claims(&token, &key, &settings))
                .await
                .map_err(|e| {
                    WardenError::Internal(format!("token verification task failed: {e}"))
                })?;

        match &result {
            Ok(claims) => debug!(claims = claims.len(), "token verified"),
            Err(e) => warn!(error = %e, "token rejected"),
        }
        result
    }

    /// Verify `token` and decide whether it satisfies `required`.
    ///
    /// Uses the authorization callback when one is registered and the claim
    /// matcher (by default [`ExactMatch`]) otherwise. Decode failures are
    /// returned as errors, never as `Ok(false)`.
    pub async fn authorize_token(
        &self,
        token: &str,
        required: Option<&Claims>,
    ) -> Result<bool, WardenError> {
        let payload = self.decode(token).await?;
        let authorized = self
            .dispatcher
            .authorize_or(payload, required.cloned(), self.matcher.as_ref())
            .await?;
        debug!(authorized, "authorization decided");
        Ok(authorized)
    }

    /// Add `iat`/`exp`/`iss`/`aud` to a policy-built payload per the settings.
    fn stamp(&self, mut claims: Claims) -> Claims {
        if let Some(ttl) = self.settings.ttl {
            let now = get_current_timestamp();
            claims.insert("iat".to_string(), Value::from(now));
            claims.insert("exp".to_string(), Value::from(now + ttl.as_secs()));
        }
        if let Some(ref iss) = self.settings.issuer {
            claims.insert("iss".to_string(), Value::from(iss.as_str()));
        }
        match self.settings.audience.as_deref() {
            Some([single]) => {
                claims.insert("aud".to_string(), Value::from(single.as_str()));
            }
            Some(many) if !many.is_empty() => {
                claims.insert("aud".to_string(), Value::from(many.to_vec()));
            }
            _ => {}
        }
        claims
    }

    /// Reject a callback claim map that decode would refuse for `iss`/`aud`.
    fn check_registered(&self, claims: &Claims) -> Result<(), WardenError> {
        if let Some(ref iss) = self.settings.issuer
            && claims.get("iss").and_then(Value::as_str) != Some(iss.as_str())
        {
            return Err(WardenError::InvalidInput(format!(
                "authentication callback claims must carry `iss` = {iss:?}"
            )));
        }
        if let Some(ref audience) = self.settings.audience {
            let matches = |v: &Value| v.as_str().is_some_and(|a| audience.iter().any(|x| x == a));
            let ok = match claims.get("aud") {
                Some(Value::Array(values)) => values.iter().any(matches),
                Some(value) => matches(value),
                None => false,
            };
            if !ok {
                return Err(WardenError::InvalidInput(format!(
                    "authentication callback claims must carry an `aud` in {audience:?}"
                )));
            }
        }
        Ok(())
    }
}

impl<C> std::fmt::Debug for ClaimEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimEngine")
            .field("dispatcher", &self.dispatcher)
            .field("signing_key", &self.signing_key)
            .field("verification_key", &self.verification_key)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
