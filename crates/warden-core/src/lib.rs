// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Warden authentication adapter.
//!
//! This crate provides the error taxonomy, claim types, and trait seams shared
//! by the callback dispatcher and the JWT claim engine. Policies (claim
//! matching, default payload construction) and adapters are defined here so
//! they can be swapped without touching the engine.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BoxError, WardenError};
pub use types::{
    AuthnOutcome, CallbackStage, Claims, HealthStatus, IssuedToken, TokenAlgorithm, TokenFault,
};

pub use traits::{AuthAdapter, ClaimMatcher, PayloadPolicy, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warden_error_has_all_variants() {
        let _not_configured = WardenError::NotConfigured {
            what: "authentication callback",
        };
        let _callback = WardenError::CallbackFailed {
            stage: CallbackStage::Authentication,
            source: Box::new(std::io::Error::other("test")),
        };
        let _signing_key = WardenError::MissingSigningKey;
        let _verification_key = WardenError::MissingVerificationKey;
        let _input = WardenError::InvalidInput("test".into());
        let _token = WardenError::InvalidToken {
            fault: TokenFault::Malformed,
            source: Box::new(std::io::Error::other("test")),
        };
        let _key = WardenError::InvalidKey("test".into());
        let _signing = WardenError::Signing {
            source: Box::new(std::io::Error::other("test")),
        };
        let _config = WardenError::Config("test".into());
        let _internal = WardenError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_auth_adapter<T: AuthAdapter>() {}
        fn _assert_claim_matcher<T: ClaimMatcher>() {}
        fn _assert_payload_policy<T: PayloadPolicy>() {}
    }
}
