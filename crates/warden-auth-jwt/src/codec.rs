// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JWT encoding and decoding with RSA-class algorithms.
//!
//! The wire format is delegated to `jsonwebtoken`. This module only chooses
//! the header and validation rules and maps library errors onto
//! [`TokenFault`].

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use warden_core::{Claims, TokenAlgorithm, TokenFault, WardenError};

use crate::keys::{SigningKey, VerificationKey};
use crate::settings::TokenSettings;

pub(crate) fn to_jwt_algorithm(algorithm: TokenAlgorithm) -> Algorithm {
    match algorithm {
        TokenAlgorithm::RS256 => Algorithm::RS256,
        TokenAlgorithm::RS384 => Algorithm::RS384,
        TokenAlgorithm::RS512 => Algorithm::RS512,
        TokenAlgorithm::PS256 => Algorithm::PS256,
        TokenAlgorithm::PS384 => Algorithm::PS384,
        TokenAlgorithm::PS512 => Algorithm::PS512,
    }
}

/// Sign `claims` and return the compact token.
pub fn encode_claims(
    claims: &Claims,
    key: &SigningKey,
    settings: &TokenSettings,
) -> Result<String, WardenError> {
    let mut header = Header::new(to_jwt_algorithm(settings.algorithm));
    header.kid = settings.key_id.clone();

    encode(&header, claims, key.encoding_key()).map_err(|e| WardenError::Signing {
        source: Box::new(e),
    })
}

/// Verify `token` and return its payload.
///
/// `exp` and `nbf` are checked when present but not required, since issued
/// payloads carry exactly what the authenticator returned.
pub fn decode_claims(
    token: &str,
    key: &VerificationKey,
    settings: &TokenSettings,
) -> Result<Claims, WardenError> {
    let validation = validation(settings);
    decode::<Claims>(token, key.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(map_jwt_error)
}

fn validation(settings: &TokenSettings) -> Validation {
    let mut validation = Validation::new(to_jwt_algorithm(settings.algorithm));
    validation.algorithms = vec![to_jwt_algorithm(settings.algorithm)];
    validation.leeway = settings.leeway_secs;
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_nbf = true;

    if let Some(ref iss) = settings.issuer {
        validation.set_issuer(&[iss]);
        validation.required_spec_claims.insert("iss".to_string());
    }

    match settings.audience {
        Some(ref aud) => {
            validation.set_audience(aud);
            validation.required_spec_claims.insert("aud".to_string());
        }
        None => validation.validate_aud = false,
    }

    validation
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> WardenError {
    let fault = match err.kind() {
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => TokenFault::Expired,
        ErrorKind::InvalidSignature => TokenFault::BadSignature,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::InvalidAlgorithmName => TokenFault::Algorithm,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_) => TokenFault::Claim,
        _ => TokenFault::Malformed,
    };
    WardenError::InvalidToken {
        fault,
        source: Box::new(err),
    }
}
