//! Sessions, report authorization, and the auth gateway for reportgate.
//!
//! This crate provides:
//! - The in-memory session store (`SessionStore`, `Session`)
//! - User -> groups -> reports resolution (`resolver`)
//! - The gateway exposing login, logout and report checks (`AuthGateway`)
//! - A seam for credential verification (`CredentialVerifier`)
//!
//! # Example
//!
//! ```
//! use reportgate_access::{AuthGateway, SessionStore};
//! use reportgate_directory::{
//!     CredentialDirectory, Group, MemoryCredentialSource, MemoryReportCatalog, ReloadPolicy, User,
//! };
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let source = MemoryCredentialSource::new(
//!     vec![User::new("alice", "secret", ["analysts"])],
//!     vec![Group::new("analysts", ["sales", "ops"])],
//! );
//! let gateway = AuthGateway::new(
//!     SessionStore::default(),
//!     CredentialDirectory::new(Arc::new(source), ReloadPolicy::Always),
//!     Arc::new(MemoryReportCatalog::default()),
//! );
//!
//! let token = gateway.authenticate("alice", "secret").await.unwrap().to_string();
//! assert!(gateway.can_access_report(&token, "sales").await.is_ok());
//! assert!(gateway.can_access_report(&token, "finance").await.is_err());
//! # });
//! ```

pub mod error;
pub mod gateway;
pub mod resolver;
pub mod session;
pub mod store;
pub mod verify;

// Re-export main types at crate root
pub use error::{AccessError, AuthenticationError, AuthorizationError, ResolveError};
pub use gateway::AuthGateway;
pub use session::{DEFAULT_SESSION_TTL, Session};
pub use store::SessionStore;
pub use verify::{CredentialVerifier, PlaintextVerifier};
