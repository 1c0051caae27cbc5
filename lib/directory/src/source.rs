//! Credential sources: where user and group definitions come from.

use crate::error::ConfigLoadError;
use crate::model::{Group, User};
use async_trait::async_trait;
use reportgate_core::Result;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the user document inside the config directory.
pub const USERS_FILE: &str = "users.yaml";

/// File name of the group document inside the config directory.
pub const GROUPS_FILE: &str = "groups.yaml";

/// Trait for reading user and group definitions.
///
/// Implementations are read-only and idempotent; they may be called
/// concurrently and without coordination with the session store.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Reads every user definition.
    async fn read_users(&self) -> Result<Vec<User>, ConfigLoadError>;

    /// Reads every group definition.
    async fn read_groups(&self) -> Result<Vec<Group>, ConfigLoadError>;
}

/// Reads `users.yaml` and `groups.yaml` from a directory.
#[derive(Debug, Clone)]
pub struct YamlCredentialSource {
    config_dir: PathBuf,
}

impl YamlCredentialSource {
    /// Creates a source rooted at `config_dir`.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Returns the directory documents are read from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

#[async_trait]
impl CredentialSource for YamlCredentialSource {
    async fn read_users(&self) -> Result<Vec<User>, ConfigLoadError> {
        read_yaml_document(&self.config_dir.join(USERS_FILE)).await
    }

    async fn read_groups(&self) -> Result<Vec<Group>, ConfigLoadError> {
        read_yaml_document(&self.config_dir.join(GROUPS_FILE)).await
    }
}

/// Fixed, in-memory user and group tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialSource {
    users: Vec<User>,
    groups: Vec<Group>,
}

impl MemoryCredentialSource {
    /// Creates a source that always returns the given tables.
    #[must_use]
    pub fn new(users: Vec<User>, groups: Vec<Group>) -> Self {
        Self { users, groups }
    }
}

#[async_trait]
impl CredentialSource for MemoryCredentialSource {
    async fn read_users(&self) -> Result<Vec<User>, ConfigLoadError> {
        Ok(self.users.clone())
    }

    async fn read_groups(&self) -> Result<Vec<Group>, ConfigLoadError> {
        Ok(self.groups.clone())
    }
}

/// Reads and parses one YAML document.
pub(crate) async fn read_yaml_document<T>(path: &Path) -> Result<T, ConfigLoadError>
where
    T: DeserializeOwned,
{
    debug!(path = %path.display(), "reading configuration document");

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigLoadError::Missing {
                path: path.to_path_buf(),
            },
            _ => ConfigLoadError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

    let parsed = serde_yaml::from_str(&contents).map_err(|e| ConfigLoadError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(parsed)
}
