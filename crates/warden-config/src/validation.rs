// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::WardenConfig;

/// Longest accepted clock skew tolerance.
pub const MAX_LEEWAY_SECS: u64 = 3600;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &WardenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let keys = &config.keys;

    if keys.signing_key.is_some() && keys.signing_key_file.is_some() {
        errors.push(validation(
            "keys.signing_key and keys.signing_key_file are mutually exclusive",
        ));
    }
    if keys.verification_key.is_some() && keys.verification_key_file.is_some() {
        errors.push(validation(
            "keys.verification_key and keys.verification_key_file are mutually exclusive",
        ));
    }
    if keys.key_passphrase.is_some() && !keys.has_signing_key() {
        errors.push(validation(
            "keys.key_passphrase is set but no signing key is configured",
        ));
    }
    for (name, path) in [
        ("keys.signing_key_file", &keys.signing_key_file),
        ("keys.verification_key_file", &keys.verification_key_file),
    ] {
        if let Some(path) = path
            && !path.is_file()
        {
            errors.push(validation(&format!(
                "{name} `{}` does not exist or is not a file",
                path.display()
            )));
        }
    }

    if config.token.ttl_secs == Some(0) {
        errors.push(validation("token.ttl_secs must be greater than zero"));
    }
    if config.token.leeway_secs > MAX_LEEWAY_SECS {
        errors.push(validation(&format!(
            "token.leeway_secs must be at most {MAX_LEEWAY_SECS}, got {}",
            config.token.leeway_secs
        )));
    }
    if config.token.issuer.as_deref().is_some_and(|s| s.trim().is_empty()) {
        errors.push(validation("token.issuer must not be empty when set"));
    }
    if config.token.audience.iter().any(|a| a.trim().is_empty()) {
        errors.push(validation("token.audience entries must not be empty"));
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(validation(&format!(
            "log.level `{}` is not one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}
