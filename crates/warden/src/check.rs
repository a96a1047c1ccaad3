// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden check` command implementation.
//!
//! Parses the configured keys one by one, proves they form a pair with a
//! probe token, and reports the resulting engine health.

use std::io::IsTerminal;
use std::process::ExitCode;

use serde_json::Value;
use warden_auth_jwt::{ClaimEngine, SigningKey, TokenSettings, VerificationKey, codec};
use warden_config::WardenConfig;
use warden_core::{Claims, HealthStatus, PluginAdapter, WardenError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

pub async fn run_check(config: &WardenConfig, plain: bool) -> Result<ExitCode, WardenError> {
    let results = collect_checks(config).await;
    let use_color = !plain && std::io::stdout().is_terminal();

    println!();
    println!("  warden check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result, use_color));
    }
    println!();

    let failures = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    if failures == 0 {
        println!("  No failures.");
        println!();
        Ok(ExitCode::SUCCESS)
    } else {
        let word = if failures == 1 { "check" } else { "checks" };
        println!("  {failures} {word} failed.");
        println!();
        Ok(ExitCode::FAILURE)
    }
}

pub async fn collect_checks(config: &WardenConfig) -> Vec<CheckResult> {
    let settings = TokenSettings::from(&config.token);
    let mut results = vec![CheckResult::new(
        "token settings",
        CheckStatus::Pass,
        describe_settings(&settings),
    )];

    let signing = config
        .keys
        .signing_key_pem()
        .and_then(|pem| {
            pem.map(|pem| SigningKey::from_pem(&pem, config.keys.passphrase().as_ref()))
                .transpose()
        });
    results.push(match &signing {
        Ok(Some(key)) => CheckResult::new(
            "signing key",
            CheckStatus::Pass,
            format!("RSA-{}", key.bits()),
        ),
        Ok(None) => CheckResult::new(
            "signing key",
            CheckStatus::Warn,
            "not configured, tokens cannot be issued",
        ),
        Err(e) => CheckResult::new("signing key", CheckStatus::Fail, e.to_string()),
    });

    let verification = config
        .keys
        .verification_key_pem()
        .and_then(|pem| pem.map(|pem| VerificationKey::from_pem(&pem)).transpose());
    results.push(match &verification {
        Ok(Some(key)) => CheckResult::new(
            "verification key",
            CheckStatus::Pass,
            format!("RSA-{}", key.bits()),
        ),
        Ok(None) => CheckResult::new(
            "verification key",
            CheckStatus::Warn,
            "not configured, tokens cannot be verified",
        ),
        Err(e) => CheckResult::new("verification key", CheckStatus::Fail, e.to_string()),
    });

    if let (Ok(Some(signing)), Ok(Some(verification))) = (&signing, &verification) {
        results.push(probe_key_pair(signing, verification, &settings));
    }

    if results.iter().all(|r| r.status != CheckStatus::Fail) {
        results.push(match ClaimEngine::from_config(config) {
            Ok(engine) => health_result(engine.health_check().await),
            Err(e) => CheckResult::new("engine", CheckStatus::Fail, e.to_string()),
        });
    }

    results
}

/// Sign and verify a throwaway payload to prove the two keys belong together.
fn probe_key_pair(
    signing: &SigningKey,
    verification: &VerificationKey,
    settings: &TokenSettings,
) -> CheckResult {
    let mut probe = Claims::new();
    probe.insert("probe".to_string(), Value::Bool(true));
    if let Some(ref iss) = settings.issuer {
        probe.insert("iss".to_string(), Value::from(iss.as_str()));
    }
    if let Some(ref aud) = settings.audience {
        probe.insert("aud".to_string(), Value::from(aud.clone()));
    }

    let outcome = codec::encode_claims(&probe, signing, settings)
        .and_then(|token| codec::decode_claims(&token, verification, settings));
    match outcome {
        Ok(_) => CheckResult::new("key pair", CheckStatus::Pass, "probe token verified"),
        Err(e) => CheckResult::new("key pair", CheckStatus::Fail, e.to_string()),
    }
}

fn health_result(health: Result<HealthStatus, WardenError>) -> CheckResult {
    match health {
        Ok(HealthStatus::Healthy) => CheckResult::new("engine", CheckStatus::Pass, "healthy"),
        Ok(HealthStatus::Degraded(why)) => CheckResult::new("engine", CheckStatus::Warn, why),
        Ok(HealthStatus::Unhealthy(why)) => CheckResult::new("engine", CheckStatus::Fail, why),
        Err(e) => CheckResult::new("engine", CheckStatus::Fail, e.to_string()),
    }
}

fn describe_settings(settings: &TokenSettings) -> String {
    let mut parts = vec![settings.algorithm.to_string()];
    if let Some(ttl) = settings.ttl {
        parts.push(format!("ttl {}s", ttl.as_secs()));
    }
    if let Some(ref iss) = settings.issuer {
        parts.push(format!("iss {iss}"));
    }
    if let Some(ref kid) = settings.key_id {
        parts.push(format!("kid {kid}"));
    }
    parts.push(format!("leeway {}s", settings.leeway_secs));
    parts.join(", ")
}

fn render_line(result: &CheckResult, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<18} {message}", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<18} {}", result.name, result.message)
    }
}
