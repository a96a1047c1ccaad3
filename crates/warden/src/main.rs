// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warden - pluggable token authentication.
//!
//! Command-line entry point for checking configuration and verifying tokens.

mod check;
mod token;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use warden_auth_jwt::ClaimEngine;
use warden_config::WardenConfig;

/// Warden - pluggable token authentication.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configuration, parse the keys, and report engine health.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Verify a token and print its payload as JSON. `-` reads from stdin.
    Decode { token: String },
    /// Verify a token and match it against required claims.
    ///
    /// Exits 0 when authorized, 2 when denied, 1 on error.
    Authorize {
        token: String,
        /// Required claim; the value is parsed as JSON, else taken as a string.
        #[arg(long = "claim", value_name = "KEY=VALUE", value_parser = token::parse_claim)]
        claims: Vec<(String, Value)>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => warden_config::load_and_validate_path(path),
        None => warden_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            warden_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Commands::Check { plain } => check::run_check(&config, plain).await,
        Commands::Decode { token } => match engine(&config) {
            Ok(engine) => token::run_decode(&engine, &token).await,
            Err(code) => return code,
        },
        Commands::Authorize { token, claims } => match engine(&config) {
            Ok(engine) => token::run_authorize(&engine, &token, claims).await,
            Err(code) => return code,
        },
    };

    result.unwrap_or_else(|e| {
        eprintln!("warden: {e}");
        ExitCode::FAILURE
    })
}

fn engine(config: &WardenConfig) -> Result<ClaimEngine, ExitCode> {
    ClaimEngine::from_config(config).map_err(|e| {
        tracing::error!(error = %e, "failed to build claim engine");
        eprintln!("warden: {e}");
        ExitCode::FAILURE
    })
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warden={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use serial_test::serial;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn authorize_collects_repeated_claims() {
        let cli = Cli::try_parse_from([
            "warden",
            "authorize",
            "a.b.c",
            "--claim",
            "admin=true",
            "--claim",
            "id=alice",
        ])
        .unwrap();
        match cli.command {
            Commands::Authorize { claims, .. } => {
                assert_eq!(
                    claims,
                    vec![
                        ("admin".to_string(), Value::Bool(true)),
                        ("id".to_string(), Value::from("alice")),
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["warden", "decode", "t", "--config", "/tmp/w.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
    }

    #[test]
    #[serial]
    fn env_overrides_reach_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warden.toml");
        std::fs::write(&path, "[token]\nalgorithm = \"RS256\"\n").unwrap();

        // SAFETY: serialized with every other env-mutating test.
        unsafe { std::env::set_var("WARDEN_TOKEN_ALGORITHM", "PS512") };
        let config = warden_config::load_and_validate_path(&path);
        unsafe { std::env::remove_var("WARDEN_TOKEN_ALGORITHM") };

        let engine = engine(&config.unwrap()).unwrap();
        assert_eq!(
            engine.token_settings().algorithm,
            warden_core::TokenAlgorithm::PS512
        );
    }

    #[test]
    #[serial]
    fn bad_key_in_env_fails_engine_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warden.toml");
        std::fs::write(&path, "").unwrap();

        unsafe { std::env::set_var("WARDEN_KEYS_VERIFICATION_KEY", "not a pem") };
        let config = warden_config::load_and_validate_path(&path);
        unsafe { std::env::remove_var("WARDEN_KEYS_VERIFICATION_KEY") };

        assert!(engine(&config.unwrap()).is_err());
    }
}
