// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RSA-signed JWT claim engine.
//!
//! [`ClaimEngine`] sits on top of a [`warden_dispatch::Dispatcher`]:
//!
//! - `issue` authenticates a credential through the registered callback and
//!   signs the resulting payload.
//! - `decode` verifies an inbound token against the configured public key.
//! - `authorize_token` decodes, then asks the authorization callback or, when
//!   none is registered, the claim matcher ([`ExactMatch`] by default).

mod adapter;
pub mod codec;
pub mod engine;
pub mod keys;
pub mod matcher;
pub mod policy;
pub mod settings;

pub use engine::ClaimEngine;
pub use keys::{SigningKey, VerificationKey};
pub use matcher::ExactMatch;
pub use policy::{EchoCredentials, IdentifierOnly, ID_CLAIM, SECRET_CLAIM};
pub use settings::TokenSettings;
