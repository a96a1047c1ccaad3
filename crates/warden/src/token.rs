// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `warden decode` and `warden authorize` command implementations.

use std::io::Read;
use std::process::ExitCode;

use serde_json::Value;
use warden_auth_jwt::ClaimEngine;
use warden_core::{Claims, WardenError};

/// Exit status for a well-formed token that does not satisfy the requirement.
pub const DENIED: u8 = 2;

/// Parse a `KEY=VALUE` pair. The value is JSON if it parses as JSON, else a string.
pub fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty claim name in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// Collect `--claim` pairs into a required-claims map; no pairs means no requirement.
pub fn required_claims(pairs: Vec<(String, Value)>) -> Option<Claims> {
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.into_iter().collect())
    }
}

/// The token argument, read from stdin when given as `-`.
fn resolve_token(arg: &str) -> Result<String, WardenError> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| WardenError::InvalidInput(format!("failed to read token from stdin: {e}")))?;
    Ok(buf.trim().to_string())
}

pub async fn run_decode(engine: &ClaimEngine, token: &str) -> Result<ExitCode, WardenError> {
    let payload = engine.decode(&resolve_token(token)?).await?;
    let rendered = serde_json::to_string_pretty(&payload)
        .map_err(|e| WardenError::Internal(format!("failed to render payload: {e}")))?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

pub async fn run_authorize(
    engine: &ClaimEngine,
    token: &str,
    claims: Vec<(String, Value)>,
) -> Result<ExitCode, WardenError> {
    let required = required_claims(claims);
    let authorized = engine
        .authorize_token(&resolve_token(token)?, required.as_ref())
        .await?;

    if authorized {
        println!("authorized");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("denied");
        Ok(ExitCode::from(DENIED))
    }
}
