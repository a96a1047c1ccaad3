// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! 2048-bit RSA test keys. Never use these outside tests.

/// PKCS#8 private key.
pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_rsa_priv.pem");

/// SPKI public key matching [`TEST_PRIVATE_KEY`].
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_rsa_pub.pem");

/// [`TEST_PRIVATE_KEY`] encrypted with PBES2 (PBKDF2-SHA256, AES-256-CBC).
pub const TEST_PRIVATE_KEY_ENCRYPTED: &str =
    include_str!("../fixtures/test_rsa_priv_encrypted.pem");

/// Passphrase for [`TEST_PRIVATE_KEY_ENCRYPTED`].
pub const TEST_KEY_PASSPHRASE: &str = "correct-horse-battery";

/// An unrelated key pair, for wrong-key checks.
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_rsa_priv.pem");
pub const OTHER_PUBLIC_KEY: &str = include_str!("../fixtures/other_rsa_pub.pem");
