//! Session state for logged-in users.
//!
//! A session is created on successful login and lives in the
//! [`SessionStore`](crate::SessionStore) until it is logged out or swept
//! after its idle window elapses. Every validated access slides the window.

use chrono::{DateTime, Duration, Utc};
use reportgate_core::SessionToken;

/// Idle window after which a session expires.
pub const DEFAULT_SESSION_TTL: Duration = Duration::days(2);

/// An authenticated user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque token identifying this session.
    token: SessionToken,
    /// Username the session was issued to.
    username: String,
    /// Whether the session is still logged in.
    ///
    /// True for every stored session: logout removes the session instead of
    /// clearing this flag. Validation and logout still check it so a store
    /// that keeps logged-out sessions would behave the same.
    logged_in: bool,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session was last validated.
    last_accessed: DateTime<Utc>,
}

impl Session {
    /// Creates a logged-in session for `username` at `now`.
    #[must_use]
    pub fn new(token: SessionToken, username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token,
            username: username.into(),
            logged_in: true,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Returns the session token.
    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Returns the owning username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true while the session is logged in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session was last validated.
    #[must_use]
    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    /// Returns true if more than `ttl` has passed since the last access.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_accessed > ttl
    }

    /// Returns true if the session may be used at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.logged_in && !self.is_expired_at(now, ttl)
    }

    /// Slides the idle window forward.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_accessed {
            self.last_accessed = now;
        }
    }
}
