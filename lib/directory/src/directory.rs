//! Snapshot provider with an explicit reload policy.
//!
//! The directory decides when the underlying [`CredentialSource`] is read.
//! Either way, a failed read never yields stale data: the failing table is
//! empty in the returned snapshot and any cached snapshot is dropped.

use crate::error::ConfigLoadError;
use crate::snapshot::CredentialSnapshot;
use crate::source::CredentialSource;
use parking_lot::Mutex;
use reportgate_core::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// When to re-read the credential source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Read the source on every snapshot request.
    #[default]
    Always,
    /// Reuse the last complete snapshot until it is older than `max_age`.
    Cached { max_age: Duration },
}

struct CachedSnapshot {
    snapshot: Arc<CredentialSnapshot>,
    loaded_at: Instant,
}

/// Provides credential snapshots according to a [`ReloadPolicy`].
pub struct CredentialDirectory {
    source: Arc<dyn CredentialSource>,
    policy: ReloadPolicy,
    cache: Mutex<Option<CachedSnapshot>>,
}

impl CredentialDirectory {
    /// Creates a directory over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn CredentialSource>, policy: ReloadPolicy) -> Self {
        Self {
            source,
            policy,
            cache: Mutex::new(None),
        }
    }

    /// Returns the configured reload policy.
    #[must_use]
    pub fn policy(&self) -> ReloadPolicy {
        self.policy
    }

    /// Drops any cached snapshot so the next request reads the source.
    pub fn invalidate(&self) {
        self.cache.lock().take();
    }

    /// Returns the current snapshot.
    ///
    /// Never fails. Tables that could not be loaded are empty.
    pub async fn snapshot(&self) -> Arc<CredentialSnapshot> {
        if let ReloadPolicy::Cached { max_age } = self.policy {
            let cache = self.cache.lock();
            if let Some(cached) = cache.as_ref() {
                if cached.loaded_at.elapsed() <= max_age {
                    return Arc::clone(&cached.snapshot);
                }
            }
        }

        let users = self.source.read_users().await;
        let groups = self.source.read_groups().await;
        let complete = users.is_ok() && groups.is_ok();

        let snapshot = Arc::new(CredentialSnapshot::new(
            users.unwrap_or_else(|report| degrade("users", report)),
            groups.unwrap_or_else(|report| degrade("groups", report)),
        ));
        debug!(
            users = snapshot.user_count(),
            groups = snapshot.group_count(),
            complete,
            "loaded credential snapshot"
        );

        if let ReloadPolicy::Cached { .. } = self.policy {
            let mut cache = self.cache.lock();
            *cache = complete.then(|| CachedSnapshot {
                snapshot: Arc::clone(&snapshot),
                loaded_at: Instant::now(),
            });
        }

        snapshot
    }
}

fn degrade<T>(table: &str, report: rootcause::Report<ConfigLoadError>) -> Vec<T> {
    if report.current_context().is_missing() {
        error!(table, error = %report, "credential document missing, treating as empty");
    } else {
        warn!(table, error = %report, "credential document unusable, treating as empty");
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, User};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Source that counts reads and can be switched into a failing state.
    #[derive(Default)]
    struct FlakySource {
        reads: AtomicUsize,
        broken: AtomicBool,
    }

    impl FlakySource {
        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        fn set_broken(&self, broken: bool) {
            self.broken.store(broken, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CredentialSource for FlakySource {
        async fn read_users(&self) -> Result<Vec<User>, ConfigLoadError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.broken.load(Ordering::SeqCst) {
                return Err(ConfigLoadError::Malformed {
                    path: "users.yaml".into(),
                    reason: "broken on purpose".to_string(),
                }
                .into());
            }
            Ok(vec![User::new("alice", "secret", ["analysts"])])
        }

        async fn read_groups(&self) -> Result<Vec<Group>, ConfigLoadError> {
            Ok(vec![Group::new("analysts", ["sales", "ops"])])
        }
    }

    #[tokio::test]
    async fn always_policy_reads_every_time() {
        let source = Arc::new(FlakySource::default());
        let directory = CredentialDirectory::new(source.clone(), ReloadPolicy::Always);

        directory.snapshot().await;
        directory.snapshot().await;
        directory.snapshot().await;

        assert_eq!(source.reads(), 3);
    }

    #[tokio::test]
    async fn cached_policy_reuses_snapshot() {
        let source = Arc::new(FlakySource::default());
        let directory = CredentialDirectory::new(
            source.clone(),
            ReloadPolicy::Cached {
                max_age: Duration::from_secs(3600),
            },
        );

        let first = directory.snapshot().await;
        let second = directory.snapshot().await;

        assert_eq!(source.reads(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let source = Arc::new(FlakySource::default());
        let directory = CredentialDirectory::new(
            source.clone(),
            ReloadPolicy::Cached {
                max_age: Duration::from_secs(3600),
            },
        );

        directory.snapshot().await;
        directory.invalidate();
        directory.snapshot().await;

        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn zero_max_age_behaves_like_always_once_elapsed() {
        let source = Arc::new(FlakySource::default());
        let directory = CredentialDirectory::new(
            source.clone(),
            ReloadPolicy::Cached {
                max_age: Duration::ZERO,
            },
        );

        directory.snapshot().await;
        std::thread::sleep(Duration::from_millis(5));
        directory.snapshot().await;

        assert_eq!(source.reads(), 2);
    }

    #[tokio::test]
    async fn failed_load_degrades_to_empty_users() {
        let source = Arc::new(FlakySource::default());
        source.set_broken(true);
        let directory = CredentialDirectory::new(source.clone(), ReloadPolicy::Always);

        let snapshot = directory.snapshot().await;

        assert_eq!(snapshot.user_count(), 0);
        assert!(snapshot.group("analysts").is_some());
    }

    #[tokio::test]
    async fn failed_reload_does_not_serve_stale_users() {
        let source = Arc::new(FlakySource::default());
        let directory = CredentialDirectory::new(
            source.clone(),
            ReloadPolicy::Cached {
                max_age: Duration::from_secs(3600),
            },
        );

        assert!(directory.snapshot().await.user("alice").is_some());

        source.set_broken(true);
        directory.invalidate();
        assert!(directory.snapshot().await.user("alice").is_none());

        // Degraded snapshots are not cached: the next call reads again.
        source.set_broken(false);
        assert!(directory.snapshot().await.user("alice").is_some());
        assert_eq!(source.reads(), 3);
    }

    #[test]
    fn default_policy_is_always() {
        assert_eq!(ReloadPolicy::default(), ReloadPolicy::Always);
    }
}
