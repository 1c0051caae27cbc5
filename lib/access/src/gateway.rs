//! The externally visible auth operations.
//!
//! [`AuthGateway`] ties together the session store, the credential
//! directory and the report catalog. Tokens arrive as plain strings from the
//! transport layer; anything that does not parse is treated like an unknown
//! token.

use crate::error::{AccessError, AuthenticationError, AuthorizationError, ResolveError};
use crate::resolver;
use crate::session::Session;
use crate::store::SessionStore;
use reportgate_core::SessionToken;
use reportgate_directory::{CredentialDirectory, ReportCatalog, ReportDetails};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Entry point for login, logout and report access checks.
pub struct AuthGateway {
    sessions: SessionStore,
    directory: CredentialDirectory,
    catalog: Arc<dyn ReportCatalog>,
}

impl AuthGateway {
    /// Creates a gateway from its collaborators.
    #[must_use]
    pub fn new(
        sessions: SessionStore,
        directory: CredentialDirectory,
        catalog: Arc<dyn ReportCatalog>,
    ) -> Self {
        Self {
            sessions,
            directory,
            catalog,
        }
    }

    /// Returns the session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Returns the credential directory.
    #[must_use]
    pub fn directory(&self) -> &CredentialDirectory {
        &self.directory
    }

    /// Logs a user in and returns a new session token.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, AuthenticationError> {
        let snapshot = self.directory.snapshot().await;
        self.sessions.login(&snapshot, username, password)
    }

    /// Checks that `token` names a live session, sliding its expiry.
    #[instrument(skip_all)]
    pub fn is_authenticated(&self, token: &str) -> Result<(), AuthenticationError> {
        self.session(token).map(|_| ())
    }

    /// Ends the session named by `token`.
    #[instrument(skip_all)]
    pub fn logout(&self, token: &str) -> Result<(), AuthenticationError> {
        let token = parse_token(token)?;
        self.sessions.logout(&token)
    }

    /// Checks that `token` is live and its user may see `report_id`.
    ///
    /// Authentication is checked first, so an invalid token never yields an
    /// authorization error.
    #[instrument(skip(self, token))]
    pub async fn can_access_report(&self, token: &str, report_id: &str) -> Result<(), AccessError> {
        let session = self.session(token)?;
        let snapshot = self.directory.snapshot().await;

        let allowed = resolver::can_access(&snapshot, session.username(), report_id)
            .map_err(|err| vanished_user(&session, err))?;

        if allowed {
            debug!(username = session.username(), "report access granted");
            Ok(())
        } else {
            debug!(username = session.username(), "report access denied");
            Err(AuthorizationError::ReportDenied {
                report_id: report_id.to_string(),
            }
            .into())
        }
    }

    /// Lists the reports visible to the session's user.
    #[instrument(skip_all)]
    pub async fn list_reports(&self, token: &str) -> Result<BTreeSet<String>, AuthenticationError> {
        let session = self.session(token)?;
        let snapshot = self.directory.snapshot().await;

        resolver::reports_for(&snapshot, session.username())
            .map_err(|err| vanished_user(&session, err))
    }

    /// Lists the reports visible to the session's user with their details.
    ///
    /// Reports the catalog cannot describe are returned with bare details.
    #[instrument(skip_all)]
    pub async fn list_reports_detailed(
        &self,
        token: &str,
    ) -> Result<BTreeMap<String, ReportDetails>, AuthenticationError> {
        let reports = self.list_reports(token).await?;

        let mut detailed = BTreeMap::new();
        for report_id in reports {
            let details = match self.catalog.describe(&report_id).await {
                Ok(Some(details)) => details,
                Ok(None) => {
                    warn!(report_id, "report catalog has no entry for report");
                    ReportDetails::bare(&report_id)
                }
                Err(report) => {
                    warn!(report_id, error = %report, "report catalog lookup failed");
                    ReportDetails::bare(&report_id)
                }
            };
            detailed.insert(report_id, details);
        }
        Ok(detailed)
    }

    /// Removes expired sessions. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sessions.sweep_expired()
    }

    fn session(&self, token: &str) -> Result<Session, AuthenticationError> {
        let token = parse_token(token)?;
        self.sessions.validate(&token)
    }
}

fn parse_token(token: &str) -> Result<SessionToken, AuthenticationError> {
    token.parse().map_err(|err| {
        debug!(error = %err, "presented token is not well formed");
        AuthenticationError::NotLoggedIn
    })
}

/// A live session whose user has since been removed from configuration.
fn vanished_user(session: &Session, err: ResolveError) -> AuthenticationError {
    warn!(
        token = %session.token().redacted(),
        error = %err,
        "session refers to a user that no longer exists"
    );
    AuthenticationError::NotLoggedIn
}
