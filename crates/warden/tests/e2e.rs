// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `warden` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use warden_auth_jwt::{SigningKey, TokenSettings, codec};
use warden_core::Claims;
use warden_test_utils::keys;

/// A temp directory holding the test key pair and a config pointing at it.
struct Fixture {
    dir: TempDir,
    config: PathBuf,
}

impl Fixture {
    fn new(extra: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let private = dir.path().join("private.pem");
        let public = dir.path().join("public.pem");
        std::fs::write(&private, keys::TEST_PRIVATE_KEY).unwrap();
        std::fs::write(&public, keys::TEST_PUBLIC_KEY).unwrap();

        let config = dir.path().join("warden.toml");
        std::fs::write(
            &config,
            format!(
                "[keys]\nsigning_key_file = {:?}\nverification_key_file = {:?}\n{extra}",
                private.display().to_string(),
                public.display().to_string(),
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn run(&self, args: &[&str]) -> Output {
        warden(&self.config, self.dir.path(), args)
    }
}

fn warden(config: &Path, cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_warden"))
        .arg("--config")
        .arg(config)
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn warden")
}

fn sign(payload: Value) -> String {
    let claims: Claims = payload.as_object().cloned().unwrap();
    let key = SigningKey::from_pem(keys::TEST_PRIVATE_KEY, None).unwrap();
    codec::encode_claims(&claims, &key, &TokenSettings::default()).unwrap()
}

#[test]
fn check_passes_with_matching_keys() {
    let fixture = Fixture::new("");
    let out = fixture.run(&["check", "--plain"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "{stdout}");
    assert!(stdout.contains("probe token verified"));
    assert!(stdout.contains("RSA-2048"));
}

#[test]
fn decode_prints_payload_json() {
    let fixture = Fixture::new("");
    let token = sign(json!({"id": "alice", "secret": "pw"}));

    let out = fixture.run(&["decode", &token]);
    assert!(out.status.success());
    let printed: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(printed, json!({"id": "alice", "secret": "pw"}));
}

#[test]
fn authorize_exit_codes() {
    let fixture = Fixture::new("");
    let token = sign(json!({"id": "alice", "admin": true, "level": 3}));

    let allowed = fixture.run(&[
        "authorize", &token, "--claim", "id=alice", "--claim", "admin=true",
    ]);
    assert_eq!(allowed.status.code(), Some(0));

    let denied = fixture.run(&["authorize", &token, "--claim", "level=\"3\""]);
    assert_eq!(denied.status.code(), Some(2));
    assert_eq!(String::from_utf8_lossy(&denied.stdout).trim(), "denied");

    let invalid = fixture.run(&["authorize", "not-a-token"]);
    assert_eq!(invalid.status.code(), Some(1));
}

#[test]
fn unknown_config_key_is_reported() {
    let fixture = Fixture::new("[token]\nisuer = \"x\"\n");
    let out = fixture.run(&["check"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("isuer"), "{stderr}");
}
