//! Centralized application directory paths for skillbridge.
//!
//! Provides a single source of truth for the filesystem paths used by the
//! app. Uses the [`dirs`] crate for platform-appropriate directory
//! resolution.
//!
//! # Environment Overrides
//!
//! All paths can be overridden for testing or custom deployments:
//! - `SKILLBRIDGE_DATA_DIR` — overrides [`data_dir`]
//! - `SKILLBRIDGE_CONFIG_DIR` — overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Used for persistent user data: the anonymous identity record.
///
/// Resolves to `dirs::data_dir()/skillbridge/` by default. Override with
/// the `SKILLBRIDGE_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SKILLBRIDGE_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("skillbridge"))
        .unwrap_or_else(|| PathBuf::from("/tmp/skillbridge-data"))
}

/// Application config directory.
///
/// Used for `config.toml`.
///
/// Resolves to `dirs::config_dir()/skillbridge/` by default. Override with
/// the `SKILLBRIDGE_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SKILLBRIDGE_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("skillbridge"))
        .unwrap_or_else(|| PathBuf::from("/tmp/skillbridge-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Identity record path (`data_dir()/identity.toml`).
#[must_use]
pub fn identity_file() -> PathBuf {
    data_dir().join("identity.toml")
}
