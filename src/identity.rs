//! Anonymous per-install identity.
//!
//! Each install gets a pseudo-random id (`user_` + 16 alphanumerics) and an
//! optional display name, stored as a small TOML file under the app data
//! directory so it is easy to inspect and survives restarts. There is no
//! authentication behind this id; it only distinguishes installs.

use crate::error::{Result, SessionError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ID_PREFIX: &str = "user_";
const ID_RANDOM_LEN: usize = 16;

/// File-backed identity store.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

/// The persisted identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Stable anonymous identifier for this install.
    pub user_id: String,
    /// Optional user-chosen display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// When this identity was first created.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl IdentityStore {
    /// Store backed by the default identity file under the app data dir.
    #[must_use]
    pub fn open_default() -> Self {
        Self::new(&crate::app_dirs::identity_file())
    }

    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Load the identity, generating and persisting a fresh one if none
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read, parsed, or written.
    pub fn load_or_create(&self) -> Result<Identity> {
        if let Some(existing) = self.load()? {
            return Ok(existing);
        }
        let identity = Identity {
            user_id: generate_user_id(),
            display_name: None,
            created_at: chrono::Utc::now(),
        };
        self.save(&identity)?;
        Ok(identity)
    }

    /// Load the identity record if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Identity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let identity: Identity = toml::from_str(&raw)
            .map_err(|e| SessionError::Identity(format!("invalid identity record: {e}")))?;
        Ok(Some(identity))
    }

    /// Persist the identity record, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error on serialization or write failure.
    pub fn save(&self, identity: &Identity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(identity)
            .map_err(|e| SessionError::Identity(format!("failed to serialize identity: {e}")))?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    /// Set (or clear) the display name, persisting the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be loaded or written.
    pub fn set_display_name(&self, name: Option<&str>) -> Result<Identity> {
        let mut identity = self.load_or_create()?;
        identity.display_name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToOwned::to_owned);
        self.save(&identity)?;
        Ok(identity)
    }
}

/// Generate a fresh anonymous id: `user_` + 16 random alphanumerics.
#[must_use]
pub fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_RANDOM_LEN)
        .map(|_| {
            const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();
    format!("{ID_PREFIX}{suffix}")
}
