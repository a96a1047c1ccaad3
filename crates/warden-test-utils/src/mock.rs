// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording callbacks for deterministic dispatcher and engine tests.
//!
//! Each mock hands out callbacks that share its state, so a test can keep the
//! mock, register its callback, and inspect the calls afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use secrecy::ExposeSecret;
use warden_core::{AuthnOutcome, Claims};
use warden_dispatch::{AuthnCallback, AuthnRequest, AuthzCallback, AuthzRequest, Callback};

#[derive(Default)]
struct CallLog {
    calls: AtomicUsize,
    identifiers: Mutex<Vec<String>>,
}

#[derive(Clone, Default)]
struct Table {
    credentials: HashMap<String, String>,
    claims: Option<Claims>,
}

impl Table {
    fn answer<C>(&self, log: &CallLog, req: &AuthnRequest<C>) -> AuthnOutcome {
        log.calls.fetch_add(1, Ordering::SeqCst);
        log.identifiers
            .lock()
            .expect("mock state poisoned")
            .push(req.identifier.clone());

        let accepted = self
            .credentials
            .get(&req.identifier)
            .is_some_and(|s| s == req.secret.expose_secret());
        match (&self.claims, accepted) {
            (Some(claims), true) => AuthnOutcome::Claims(claims.clone()),
            (_, accepted) => AuthnOutcome::Decision(accepted),
        }
    }
}

/// An authentication callback that accepts credentials from a fixed table.
///
/// Accepted credentials yield `Decision(true)`, or the configured claim map
/// when one was set with [`MockAuthenticator::returning_claims`]. Callbacks
/// snapshot the table when handed out; the call log stays shared.
#[derive(Clone, Default)]
pub struct MockAuthenticator {
    table: Table,
    log: Arc<CallLog>,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(mut self, identifier: &str, secret: &str) -> Self {
        self.table
            .credentials
            .insert(identifier.to_string(), secret.to_string());
        self
    }

    /// Answer accepted credentials with `claims` instead of `true`.
    pub fn returning_claims(mut self, claims: Claims) -> Self {
        self.table.claims = Some(claims);
        self
    }

    /// A callback that answers synchronously.
    pub fn immediate<C: Send + Sync + 'static>(&self) -> AuthnCallback<C> {
        let table = self.table.clone();
        let log = Arc::clone(&self.log);
        Callback::infallible(move |req: AuthnRequest<C>| table.answer(&log, &req))
    }

    /// A callback that yields to the runtime before answering.
    pub fn suspending<C: Send + Sync + 'static>(&self) -> AuthnCallback<C> {
        let table = Arc::new(self.table.clone());
        let log = Arc::clone(&self.log);
        Callback::suspending(move |req: AuthnRequest<C>| {
            let table = Arc::clone(&table);
            let log = Arc::clone(&log);
            async move {
                tokio::task::yield_now().await;
                Ok::<_, std::convert::Infallible>(table.answer(&log, &req))
            }
        })
    }

    /// Number of times any callback from this mock ran.
    pub fn calls(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }

    /// Identifiers seen, in call order.
    pub fn identifiers(&self) -> Vec<String> {
        self.log
            .identifiers
            .lock()
            .expect("mock state poisoned")
            .clone()
    }
}

/// An authorization callback with a fixed decision that records the
/// required claim maps it was asked about.
#[derive(Clone)]
pub struct MockAuthorizer {
    decision: bool,
    requests: Arc<Mutex<Vec<(Claims, Option<Claims>)>>>,
}

impl MockAuthorizer {
    pub fn new(decision: bool) -> Self {
        Self {
            decision,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn callback<C: Send + Sync + 'static>(&self) -> AuthzCallback<C> {
        let decision = self.decision;
        let requests = Arc::clone(&self.requests);
        Callback::infallible(move |req: AuthzRequest<C>| {
            requests
                .lock()
                .expect("mock state poisoned")
                .push((req.payload, req.required));
            decision
        })
    }

    /// `(payload, required)` pairs seen, in call order.
    pub fn requests(&self) -> Vec<(Claims, Option<Claims>)> {
        self.requests.lock().expect("mock state poisoned").clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("mock state poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use warden_dispatch::Dispatcher;

    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn authenticator_accepts_known_credentials() {
        let mock = MockAuthenticator::new().accept("alice", "pw");
        let dispatcher = Dispatcher::new().authn(mock.immediate());

        let ok = dispatcher.authenticate("alice", &secret("pw")).await.unwrap();
        let bad = dispatcher.authenticate("alice", &secret("no")).await.unwrap();
        assert!(ok.is_accepted());
        assert!(!bad.is_accepted());
        assert_eq!(mock.calls(), 2);
        assert_eq!(mock.identifiers(), vec!["alice", "alice"]);
    }

    #[tokio::test]
    async fn suspending_authenticator_returns_claims() {
        let claims = json!({"id": "alice", "role": "admin"})
            .as_object()
            .cloned()
            .unwrap();
        let mock = MockAuthenticator::new()
            .accept("alice", "pw")
            .returning_claims(claims.clone());
        let dispatcher = Dispatcher::new().authn(mock.suspending());

        let outcome = dispatcher.authenticate("alice", &secret("pw")).await.unwrap();
        assert_eq!(outcome, AuthnOutcome::Claims(claims));
    }

    #[tokio::test]
    async fn authorizer_records_requests() {
        let mock = MockAuthorizer::new(false);
        let dispatcher = Dispatcher::new().authz(mock.callback());

        let required = json!({"admin": true}).as_object().cloned();
        let decision = dispatcher
            .authorize(Claims::new(), required.clone())
            .await
            .unwrap();
        assert!(!decision);
        assert_eq!(mock.requests(), vec![(Claims::new(), required)]);
    }
}
