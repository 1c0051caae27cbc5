//! Credential verification seam.
//!
//! The session store never compares secrets itself. It hands the stored
//! user and the presented password to a [`CredentialVerifier`], so a hashed
//! comparison can replace the plaintext one without touching the gateway.

use reportgate_directory::User;

/// Decides whether a presented password matches a stored user.
pub trait CredentialVerifier: Send + Sync {
    /// Returns true if `password` is the user's secret.
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Exact string comparison against the configured password.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, user: &User, password: &str) -> bool {
        user.password() == password
    }
}
