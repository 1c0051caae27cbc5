//! Core types shared across the reportgate workspace.
//!
//! Provides the rootcause-backed `Result` alias and the opaque
//! [`SessionToken`] handed out on login.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, SessionToken};
