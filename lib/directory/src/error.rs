//! Error types for the directory crate.
//!
//! Loaders return `Report<ConfigLoadError>` so callers can log the full
//! chain; [`crate::CredentialDirectory`] turns any of these into an empty
//! table rather than propagating them.

use std::fmt;
use std::path::PathBuf;

/// Errors from reading a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLoadError {
    /// The document does not exist.
    Missing { path: PathBuf },
    /// The document exists but could not be read.
    Unreadable { path: PathBuf, reason: String },
    /// The document could not be parsed.
    Malformed { path: PathBuf, reason: String },
}

impl ConfigLoadError {
    /// Returns the path of the offending document.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Missing { path } | Self::Unreadable { path, .. } | Self::Malformed { path, .. } => {
                path
            }
        }
    }

    /// Returns true if the document was absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => {
                write!(f, "can not find: {}", path.display())
            }
            Self::Unreadable { path, reason } => {
                write!(f, "failed to read {}: {reason}", path.display())
            }
            Self::Malformed { path, reason } => {
                write!(f, "error parsing {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigLoadError {}
