// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Warden integration tests.
//!
//! # Components
//!
//! - [`keys`] - RSA key pairs in PEM form, including an encrypted PKCS#8 key
//! - [`MockAuthenticator`] - Authentication callback backed by an in-memory credential table
//! - [`MockAuthorizer`] - Authorization callback with a fixed decision

pub mod keys;
pub mod mock;

pub use mock::{MockAuthenticator, MockAuthorizer};
