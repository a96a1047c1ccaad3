// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload policies: what goes into a token when the authenticator only says `true`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use warden_core::{Claims, PayloadPolicy};

/// Claim name carrying the authenticated identifier.
pub const ID_CLAIM: &str = "id";

/// Claim name carrying the secret under [`EchoCredentials`].
pub const SECRET_CLAIM: &str = "secret";

/// Echo both credentials into the payload: `{"id": .., "secret": ..}`.
///
/// This is the compatible default. The secret ends up readable by anyone
/// holding the token; use [`IdentifierOnly`] unless consumers rely on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCredentials;

impl PayloadPolicy for EchoCredentials {
    fn payload(&self, identifier: &str, secret: &SecretString) -> Claims {
        let mut claims = Claims::new();
        claims.insert(ID_CLAIM.to_string(), Value::from(identifier));
        claims.insert(
            SECRET_CLAIM.to_string(),
            Value::from(secret.expose_secret()),
        );
        claims
    }
}

/// Only the identifier: `{"id": ..}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierOnly;

impl PayloadPolicy for IdentifierOnly {
    fn payload(&self, identifier: &str, _secret: &SecretString) -> Claims {
        let mut claims = Claims::new();
        claims.insert(ID_CLAIM.to_string(), Value::from(identifier));
        claims
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("a_very_basic_password".to_string())
    }

    #[test]
    fn echo_credentials_includes_both() {
        let claims = EchoCredentials.payload("testuser@test.com", &secret());
        assert_eq!(
            Value::Object(claims),
            json!({"id": "testuser@test.com", "secret": "a_very_basic_password"})
        );
    }

    #[test]
    fn identifier_only_drops_the_secret() {
        let claims = IdentifierOnly.payload("testuser@test.com", &secret());
        assert_eq!(Value::Object(claims), json!({"id": "testuser@test.com"}));
    }
}
