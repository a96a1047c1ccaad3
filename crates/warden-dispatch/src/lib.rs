// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback dispatch for the Warden adapter.
//!
//! A host application registers an authentication callback and, optionally, an
//! authorization callback. Each is wrapped once, at registration, as either an
//! [`Callback::Immediate`] or a [`Callback::Suspending`] capability, so the
//! [`Dispatcher`] never has to inspect a callback to know how to run it.
//!
//! ```no_run
//! use secrecy::{ExposeSecret, SecretString};
//! use warden_dispatch::{AuthnRequest, Callback, Dispatcher};
//!
//! # async fn run() -> Result<(), warden_core::WardenError> {
//! let dispatcher = Dispatcher::new().authn(Callback::infallible(|req: AuthnRequest<()>| {
//!     req.identifier == "admin" && req.secret.expose_secret() == "hunter2"
//! }));
//!
//! let outcome = dispatcher
//!     .authenticate("admin", &SecretString::from("hunter2".to_string()))
//!     .await?;
//! assert!(outcome.is_accepted());
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod dispatcher;
pub mod request;

pub use callback::{Callback, CallbackPanic, InvocationMode};
pub use dispatcher::Dispatcher;
pub use request::{AuthnCallback, AuthnRequest, AuthzCallback, AuthzRequest};
