//! User and group definitions as stored in the configuration directory.
//!
//! Both types are immutable once loaded; a new load produces new values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A user allowed to log in.
///
/// The password is held as configured. Comparison is delegated to a
/// credential verifier in the access crate, so a hashed representation can
/// be stored here without changing this type's shape.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: String,
    password: String,
    #[serde(default)]
    groups: Vec<String>,
}

impl User {
    /// Creates a user definition.
    #[must_use]
    pub fn new<I, S>(username: impl Into<String>, password: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the unique username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the stored password secret.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the names of the groups this user belongs to, in configured order.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("groups", &self.groups)
            .finish()
    }
}

/// A named collection of report identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    groupname: String,
    #[serde(default)]
    reports: BTreeSet<String>,
}

impl Group {
    /// Creates a group definition.
    #[must_use]
    pub fn new<I, S>(groupname: impl Into<String>, reports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groupname: groupname.into(),
            reports: reports.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the unique group name.
    #[must_use]
    pub fn groupname(&self) -> &str {
        &self.groupname
    }

    /// Returns the report identifiers granted by this group.
    #[must_use]
    pub fn reports(&self) -> &BTreeSet<String> {
        &self.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_debug_redacts_password() {
        let user = User::new("alice", "hunter2", ["analysts"]);
        let debug = format!("{user:?}");
        assert!(debug.contains("alice"));
        assert!(debug.contains("analysts"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn user_groups_keep_configured_order() {
        let user = User::new("bob", "pw", ["zeta", "alpha", "mid"]);
        assert_eq!(user.groups(), &["zeta", "alpha", "mid"]);
    }

    #[test]
    fn user_deserializes_from_yaml() {
        let yaml = "username: testuser\npassword: testuserpass\ngroups:\n  - test reports\n";
        let user: User = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.password(), "testuserpass");
        assert_eq!(user.groups(), &["test reports"]);
    }

    #[test]
    fn user_without_groups_defaults_to_none() {
        let yaml = "username: loner\npassword: pw\n";
        let user: User = serde_yaml::from_str(yaml).expect("deserialize");
        assert!(user.groups().is_empty());
    }

    #[test]
    fn group_deduplicates_reports() {
        let group = Group::new("analysts", ["sales", "ops", "sales"]);
        assert_eq!(group.reports().len(), 2);
        assert!(group.reports().contains("ops"));
    }

    #[test]
    fn group_deserializes_from_yaml() {
        let yaml = "groupname: test reports\nreports:\n  - fake1\n";
        let group: Group = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(group.groupname(), "test reports");
        assert!(group.reports().contains("fake1"));
    }
}
