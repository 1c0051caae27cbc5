//! Indexed view over one load of users and groups.

use crate::model::{Group, User};
use std::collections::HashMap;
use tracing::warn;

/// Users and groups from a single load, keyed by name.
///
/// When a name appears more than once the later definition wins.
#[derive(Debug, Clone, Default)]
pub struct CredentialSnapshot {
    users: HashMap<String, User>,
    groups: HashMap<String, Group>,
}

impl CredentialSnapshot {
    /// Builds a snapshot from loaded lists.
    #[must_use]
    pub fn new(users: Vec<User>, groups: Vec<Group>) -> Self {
        let mut user_map = HashMap::with_capacity(users.len());
        for user in users {
            if user_map.contains_key(user.username()) {
                warn!(username = user.username(), "duplicate user definition, keeping the last");
            }
            user_map.insert(user.username().to_string(), user);
        }

        let mut group_map = HashMap::with_capacity(groups.len());
        for group in groups {
            if group_map.contains_key(group.groupname()) {
                warn!(group = group.groupname(), "duplicate group definition, keeping the last");
            }
            group_map.insert(group.groupname().to_string(), group);
        }

        Self {
            users: user_map,
            groups: group_map,
        }
    }

    /// A snapshot with no users and no groups.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a user by exact username.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Looks up a group by exact name.
    #[must_use]
    pub fn group(&self, groupname: &str) -> Option<&Group> {
        self.groups.get(groupname)
    }

    /// Number of users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are neither users nor groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}
