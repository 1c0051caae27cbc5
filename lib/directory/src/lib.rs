//! User, group, and report definitions for reportgate.
//!
//! This crate owns everything read from the configuration directory:
//! - `users.yaml` and `groups.yaml` via a [`CredentialSource`]
//! - immutable [`CredentialSnapshot`]s built from one load
//! - the [`CredentialDirectory`], which applies a [`ReloadPolicy`]
//! - `reports.yaml` via a [`ReportCatalog`]
//!
//! A missing or malformed document never fails a request. It degrades to
//! "no data", which downstream means every login and access check is denied.
//!
//! # Example
//!
//! ```
//! use reportgate_directory::{CredentialDirectory, Group, MemoryCredentialSource, ReloadPolicy, User};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let source = MemoryCredentialSource::new(
//!     vec![User::new("alice", "secret", ["analysts"])],
//!     vec![Group::new("analysts", ["sales", "ops"])],
//! );
//! let directory = CredentialDirectory::new(Arc::new(source), ReloadPolicy::Always);
//!
//! let snapshot = directory.snapshot().await;
//! assert!(snapshot.user("alice").is_some());
//! assert_eq!(snapshot.group("analysts").map(|g| g.reports().len()), Some(2));
//! # });
//! ```

pub mod catalog;
pub mod directory;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod source;

pub use catalog::{MemoryReportCatalog, ReportCatalog, ReportDetails, YamlReportCatalog};
pub use directory::{CredentialDirectory, ReloadPolicy};
pub use error::ConfigLoadError;
pub use model::{Group, User};
pub use snapshot::CredentialSnapshot;
pub use source::{CredentialSource, MemoryCredentialSource, YamlCredentialSource};
