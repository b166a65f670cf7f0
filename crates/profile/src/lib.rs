//! Local profile persistence for the Agora dashboard
//!
//! The dashboard keeps exactly two things on disk: which wallet address
//! is connected, and the user settings belonging to each address. Both
//! are small JSON files under a data directory, the browser-local
//! storage of the original dashboard mapped onto the filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use agora_common::AppConfig;
use agora_governance::UserPreferences;

/// Errors that can occur in profile storage operations
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for profile storage operations
pub type ProfileResult<T> = Result<T, ProfileError>;

/// The connected wallet session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Connected wallet address
    pub address: String,
    /// When the wallet connected
    pub connected_at: DateTime<Utc>,
}

/// File-backed store for the wallet session and per-address preferences
pub struct ProfileStore {
    base_dir: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at the given directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a store rooted at the configured data directory
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Path::new(&config.data_dir).join("profile"))
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    fn preferences_path(&self, address: &str) -> PathBuf {
        self.base_dir
            .join("preferences")
            .join(format!("{}.json", address.to_lowercase()))
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> ProfileResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &Path,
    ) -> ProfileResult<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Record the connected wallet address
    pub async fn save_session(&self, address: &str) -> ProfileResult<WalletSession> {
        let session = WalletSession {
            address: address.to_string(),
            connected_at: Utc::now(),
        };

        self.write_json(&self.session_path(), &session).await?;
        debug!("Saved wallet session for {}", address);

        Ok(session)
    }

    /// The stored wallet session, if a wallet is connected
    pub async fn load_session(&self) -> ProfileResult<Option<WalletSession>> {
        self.read_json(&self.session_path()).await
    }

    /// Forget the connected wallet, if any
    pub async fn clear_session(&self) -> ProfileResult<()> {
        match tokio::fs::remove_file(self.session_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the preferences for an address
    pub async fn save_preferences(
        &self,
        address: &str,
        preferences: &UserPreferences,
    ) -> ProfileResult<()> {
        self.write_json(&self.preferences_path(address), preferences)
            .await?;
        debug!("Saved preferences for {}", address);
        Ok(())
    }

    /// Load the preferences for an address, defaulting when none are stored
    pub async fn load_preferences(&self, address: &str) -> ProfileResult<UserPreferences> {
        Ok(self
            .read_json(&self.preferences_path(address))
            .await?
            .unwrap_or_default())
    }

    /// Apply a change to an address's stored preferences and persist it
    pub async fn update_preferences<F>(
        &self,
        address: &str,
        update_fn: F,
    ) -> ProfileResult<UserPreferences>
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut preferences = self.load_preferences(address).await?;
        update_fn(&mut preferences);
        self.save_preferences(address, &preferences).await?;
        Ok(preferences)
    }
}
