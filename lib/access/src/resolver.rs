//! User -> groups -> reports resolution.
//!
//! A user may see a report if at least one of the groups they belong to
//! lists it. Group references that do not resolve are skipped.

use crate::error::ResolveError;
use reportgate_directory::CredentialSnapshot;
use std::collections::BTreeSet;
use tracing::warn;

/// Returns the union of the reports granted by the user's groups.
pub fn reports_for(
    snapshot: &CredentialSnapshot,
    username: &str,
) -> Result<BTreeSet<String>, ResolveError> {
    let user = snapshot
        .user(username)
        .ok_or_else(|| ResolveError::UnknownUser {
            username: username.to_string(),
        })?;

    let mut reports = BTreeSet::new();
    for groupname in user.groups() {
        match snapshot.group(groupname) {
            Some(group) => reports.extend(group.reports().iter().cloned()),
            None => warn!(
                username,
                groupname = groupname.as_str(),
                "user references a group that does not exist"
            ),
        }
    }
    Ok(reports)
}

/// Returns true if any of the user's groups lists `report_id`.
pub fn can_access(
    snapshot: &CredentialSnapshot,
    username: &str,
    report_id: &str,
) -> Result<bool, ResolveError> {
    let user = snapshot
        .user(username)
        .ok_or_else(|| ResolveError::UnknownUser {
            username: username.to_string(),
        })?;

    Ok(user.groups().iter().any(|groupname| {
        snapshot
            .group(groupname)
            .is_some_and(|group| group.reports().contains(report_id))
    }))
}
