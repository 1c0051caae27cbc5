//! In-memory session store.
//!
//! The token -> session map sits behind one mutex. Login, validation (with
//! its `last_accessed` bump), logout and sweep are mutually exclusive, and
//! nothing inside the lock does I/O: credential snapshots are loaded by the
//! caller before any store method is invoked.

use crate::error::AuthenticationError;
use crate::session::{DEFAULT_SESSION_TTL, Session};
use crate::verify::{CredentialVerifier, PlaintextVerifier};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use reportgate_core::SessionToken;
use reportgate_directory::CredentialSnapshot;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{debug, info};

/// Owner of all live sessions.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionToken, Session>>,
    ttl: Duration,
    verifier: Arc<dyn CredentialVerifier>,
}

impl SessionStore {
    /// Creates a store with the given idle TTL and plaintext verification.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_verifier(ttl, Arc::new(PlaintextVerifier))
    }

    /// Creates a store with a custom credential verifier.
    #[must_use]
    pub fn with_verifier(ttl: Duration, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            verifier,
        }
    }

    /// Returns the idle TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of sessions currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Returns true if no sessions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Verifies credentials against `snapshot` and opens a session.
    ///
    /// Blank input, an unknown username and a wrong password all fail with
    /// [`AuthenticationError::CredentialsRejected`].
    pub fn login(
        &self,
        snapshot: &CredentialSnapshot,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, AuthenticationError> {
        self.login_at(snapshot, username, password, Utc::now())
    }

    /// [`login`](Self::login) with an explicit clock reading.
    pub fn login_at(
        &self,
        snapshot: &CredentialSnapshot,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, AuthenticationError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            info!(username, "login attempted with a blank username or password");
            return Err(AuthenticationError::CredentialsRejected);
        }

        let Some(user) = snapshot.user(username) else {
            info!(username, "login attempted for a user that does not exist");
            return Err(AuthenticationError::CredentialsRejected);
        };

        if !self.verifier.verify(user, password) {
            info!(username, "login attempted with a bad password");
            return Err(AuthenticationError::CredentialsRejected);
        }

        let mut sessions = self.sessions.lock();
        let token = loop {
            let candidate = SessionToken::generate();
            if let Entry::Vacant(slot) = sessions.entry(candidate) {
                slot.insert(Session::new(candidate, username, now));
                break candidate;
            }
        };
        drop(sessions);

        info!(username, token = %token.redacted(), "session opened");
        Ok(token)
    }

    /// Checks that `token` names a live session and slides its window.
    ///
    /// Returns a copy of the session as of this access. A failing token is
    /// left in place; only [`sweep_expired`](Self::sweep_expired) removes
    /// expired sessions.
    pub fn validate(&self, token: &SessionToken) -> Result<Session, AuthenticationError> {
        self.validate_at(token, Utc::now())
    }

    /// [`validate`](Self::validate) with an explicit clock reading.
    pub fn validate_at(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthenticationError> {
        let mut sessions = self.sessions.lock();
        let Some(session) = sessions.get_mut(token) else {
            return Err(AuthenticationError::NotLoggedIn);
        };

        if !session.is_valid_at(now, self.ttl) {
            drop(sessions);
            info!(token = %token.redacted(), "session was expired or logged out");
            return Err(AuthenticationError::NotLoggedIn);
        }

        session.touch(now);
        Ok(session.clone())
    }

    /// Ends a logged-in session.
    pub fn logout(&self, token: &SessionToken) -> Result<(), AuthenticationError> {
        let mut sessions = self.sessions.lock();
        if !sessions.get(token).is_some_and(Session::is_logged_in) {
            return Err(AuthenticationError::NotLoggedIn);
        }
        sessions.remove(token);
        drop(sessions);

        info!(token = %token.redacted(), "session closed");
        Ok(())
    }

    /// Removes every session whose idle window has elapsed.
    ///
    /// Returns how many sessions were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    /// [`sweep_expired`](Self::sweep_expired) with an explicit clock reading.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut removed = Vec::new();
        {
            let mut sessions = self.sessions.lock();
            sessions.retain(|token, session| {
                let expired = session.is_expired_at(now, self.ttl);
                if expired {
                    removed.push(*token);
                }
                !expired
            });
        }

        for token in &removed {
            debug!(token = %token.redacted(), "removing expired session");
        }
        if !removed.is_empty() {
            info!(removed = removed.len(), "swept expired sessions");
        }
        removed.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportgate_directory::{Group, User};
    use std::thread;

    fn snapshot() -> CredentialSnapshot {
        CredentialSnapshot::new(
            vec![
                User::new("alice", "secret", ["analysts"]),
                User::new("bob", "hunter2", ["ops"]),
            ],
            vec![Group::new("analysts", ["sales", "ops"])],
        )
    }

    fn at(hours: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::hours(hours)
    }

    #[test]
    fn login_then_validate_succeeds_for_every_user() {
        let store = SessionStore::default();
        let snapshot = snapshot();

        for (username, password) in [("alice", "secret"), ("bob", "hunter2")] {
            let token = store.login(&snapshot, username, password).expect("login");
            let session = store.validate(&token).expect("validate");
            assert_eq!(session.username(), username);
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let store = SessionStore::default();
        let snapshot = snapshot();

        let blank_user = store.login(&snapshot, "", "secret").unwrap_err();
        let blank_password = store.login(&snapshot, "alice", "").unwrap_err();
        let whitespace_password = store.login(&snapshot, "alice", "   ").unwrap_err();
        let unknown_user = store.login(&snapshot, "mallory", "secret").unwrap_err();
        let wrong_password = store.login(&snapshot, "alice", "guess").unwrap_err();

        for err in [
            blank_user,
            blank_password,
            whitespace_password,
            unknown_user,
            wrong_password,
        ] {
            assert_eq!(err, AuthenticationError::CredentialsRejected);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn login_against_empty_snapshot_is_rejected() {
        let store = SessionStore::default();
        let err = store
            .login(&CredentialSnapshot::empty(), "alice", "secret")
            .unwrap_err();
        assert_eq!(err, AuthenticationError::CredentialsRejected);
    }

    #[test]
    fn each_login_gets_a_fresh_token() {
        let store = SessionStore::default();
        let snapshot = snapshot();

        let first = store.login(&snapshot, "alice", "secret").expect("login");
        let second = store.login(&snapshot, "alice", "secret").expect("login");

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unknown_token_fails_validate_and_logout() {
        let store = SessionStore::default();
        let token = SessionToken::generate();

        assert_eq!(
            store.validate(&token).unwrap_err(),
            AuthenticationError::NotLoggedIn
        );
        assert_eq!(
            store.logout(&token).unwrap_err(),
            AuthenticationError::NotLoggedIn
        );
    }

    #[test]
    fn logout_removes_session() {
        let store = SessionStore::default();
        let token = store.login(&snapshot(), "alice", "secret").expect("login");

        store.logout(&token).expect("logout");

        assert!(store.is_empty());
        assert!(store.validate(&token).is_err());
        assert!(store.logout(&token).is_err());
    }

    #[test]
    fn expired_session_fails_validation_but_stays_until_swept() {
        let store = SessionStore::new(Duration::hours(48));
        let token = store
            .login_at(&snapshot(), "alice", "secret", at(0))
            .expect("login");

        assert!(store.validate_at(&token, at(49)).is_err());
        assert_eq!(store.len(), 1);

        assert_eq!(store.sweep_expired_at(at(49)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn session_within_ttl_survives_sweep() {
        let store = SessionStore::new(Duration::hours(48));
        let token = store
            .login_at(&snapshot(), "alice", "secret", at(0))
            .expect("login");

        assert_eq!(store.sweep_expired_at(at(47)), 0);
        assert!(store.validate_at(&token, at(47)).is_ok());
    }

    #[test]
    fn validate_slides_expiry_window() {
        let ttl = Duration::hours(48);
        let store = SessionStore::new(ttl);
        let token = store
            .login_at(&snapshot(), "alice", "secret", at(0))
            .expect("login");

        let session = store.validate_at(&token, at(40)).expect("validate");
        assert_eq!(session.last_accessed(), at(40));

        // Just short of a full TTL after the bump, but well past the original window.
        let almost = at(40) + ttl - Duration::seconds(1);
        assert!(store.validate_at(&token, almost).is_ok());
        assert_eq!(store.sweep_expired_at(almost), 0);
    }

    #[test]
    fn failed_validation_does_not_revive_session() {
        let store = SessionStore::new(Duration::hours(48));
        let token = store
            .login_at(&snapshot(), "alice", "secret", at(0))
            .expect("login");

        assert!(store.validate_at(&token, at(50)).is_err());
        // A later clock reading still sees the original last access.
        assert!(store.validate_at(&token, at(51)).is_err());
        assert_eq!(store.sweep_expired_at(at(51)), 1);
    }

    #[test]
    fn sweep_is_idempotent() {
        let store = SessionStore::new(Duration::hours(1));
        let snapshot = snapshot();
        store
            .login_at(&snapshot, "alice", "secret", at(0))
            .expect("login");
        store
            .login_at(&snapshot, "bob", "hunter2", at(10))
            .expect("login");

        assert_eq!(store.sweep_expired_at(at(10)), 1);
        assert_eq!(store.sweep_expired_at(at(10)), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn custom_verifier_is_consulted() {
        struct RejectAll;
        impl CredentialVerifier for RejectAll {
            fn verify(&self, _user: &User, _password: &str) -> bool {
                false
            }
        }

        let store = SessionStore::with_verifier(DEFAULT_SESSION_TTL, Arc::new(RejectAll));
        let err = store.login(&snapshot(), "alice", "secret").unwrap_err();
        assert_eq!(err, AuthenticationError::CredentialsRejected);
    }

    #[test]
    fn concurrent_logins_and_validations() {
        let store = Arc::new(SessionStore::default());
        let snapshot = Arc::new(snapshot());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let snapshot = Arc::clone(&snapshot);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let token = store.login(&snapshot, "alice", "secret").expect("login");
                        store.validate(&token).expect("validate");
                        store.logout(&token).expect("logout");
                    }
                    store.login(&snapshot, "bob", "hunter2").expect("login")
                })
            })
            .collect();

        let survivors: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();

        assert_eq!(store.len(), survivors.len());
        for token in survivors {
            assert!(store.validate(&token).is_ok());
        }
    }
}
