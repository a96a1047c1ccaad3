// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `/etc/warden/warden.toml`, then `~/.config/warden/warden.toml`,
//! then `./warden.toml`, then `WARDEN_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::WardenConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/warden/warden.toml";
pub(crate) const LOCAL_CONFIG: &str = "warden.toml";

pub(crate) fn user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("warden/warden.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/warden/warden.toml`
/// 3. `~/.config/warden/warden.toml`
/// 4. `./warden.toml`
/// 5. `WARDEN_*` environment variables
pub fn load_config() -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only. No files, no env.
pub fn load_config_from_str(toml_content: &str) -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WardenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WardenConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `WARDEN_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `WARDEN_KEYS_SIGNING_KEY_FILE` is `keys.signing_key_file`.
/// `WARDEN_KEY_PASSPHRASE` is accepted as a short form of
/// `WARDEN_KEYS_KEY_PASSPHRASE`.
fn env_provider() -> Env {
    Env::prefixed("WARDEN_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    if key == "key_passphrase" {
        return "keys.key_passphrase".to_string();
    }
    for section in ["keys", "token", "log"] {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
