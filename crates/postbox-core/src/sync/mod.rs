//! Sync coordinator: populates the local store from the remote source.

use std::sync::Arc;

use crate::db::PostStore;
use crate::error::Result;
use crate::remote::RemoteSource;

pub use crate::db::MergePolicy;

/// Outcome of a populate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Populated {
    /// The store already held records; no network access was made.
    AlreadyPopulated,
    /// The store was empty and this many records were fetched and merged.
    Fetched(usize),
}

/// Decides when to pull from the remote source into the post store.
///
/// The policy is populate-once: a non-empty store is authoritative and is
/// never re-fetched, so user-applied read/delete state survives restarts.
/// The tradeoff is that new remote records are only discovered while the
/// store is empty.
pub struct SyncCoordinator {
    store: Arc<dyn PostStore>,
    remote: Arc<dyn RemoteSource>,
    policy: MergePolicy,
}

impl SyncCoordinator {
    pub fn new(
        store: Arc<dyn PostStore>,
        remote: Arc<dyn RemoteSource>,
        policy: MergePolicy,
    ) -> Self {
        Self {
            store,
            remote,
            policy,
        }
    }

    /// Ensure the store has been populated at least once.
    ///
    /// Fetches from the remote source only when the store is empty. On
    /// fetch failure the store is left untouched (still empty), so the next
    /// call retries; that caller-triggered retry is the only retry
    /// mechanism in the system.
    pub async fn ensure_populated(&self) -> Result<Populated> {
        tracing::debug!("Checking posts in store");
        if self.store.count().await? > 0 {
            tracing::debug!("Store already populated, skipping remote fetch");
            return Ok(Populated::AlreadyPopulated);
        }

        tracing::debug!("No posts in store, fetching remote");
        let posts = self.remote.fetch_all().await?;
        let fetched = posts.len();

        // Remote payloads never carry the read flag; force it false
        let posts: Vec<_> = posts.iter().map(crate::Post::as_unread).collect();
        self.store.upsert_batch(&posts, self.policy).await?;

        tracing::info!(count = fetched, "Populated store from remote");
        Ok(Populated::Fetched(fetched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LibSqlPostStore;
    use crate::error::Error;
    use crate::models::Post;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Counting fake remote; optionally fails every fetch.
    struct FakeRemote {
        posts: Vec<Post>,
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl FakeRemote {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                posts,
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteSource for FakeRemote {
        async fn fetch_all(&self) -> Result<Vec<Post>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Api("HTTP 503".to_string()));
            }
            Ok(self.posts.clone())
        }
    }

    fn sample(id: i64) -> Post {
        Post::new(id, 1, format!("T{id}"), format!("B{id}"))
    }

    async fn setup(remote: Arc<FakeRemote>) -> (Arc<LibSqlPostStore>, SyncCoordinator) {
        let store = Arc::new(LibSqlPostStore::open_in_memory().await.unwrap());
        let coordinator =
            SyncCoordinator::new(store.clone(), remote, MergePolicy::Replace);
        (store, coordinator)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_populates_empty_store() {
        let remote = Arc::new(FakeRemote::new(vec![sample(1), sample(2)]));
        let (store, coordinator) = setup(remote.clone()).await;

        let outcome = coordinator.ensure_populated().await.unwrap();
        assert_eq!(outcome, Populated::Fetched(2));
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_populate_once_skips_network_when_non_empty() {
        let remote = Arc::new(FakeRemote::new(vec![sample(1)]));
        let (_store, coordinator) = setup(remote.clone()).await;

        coordinator.ensure_populated().await.unwrap();
        let outcome = coordinator.ensure_populated().await.unwrap();

        assert_eq!(outcome, Populated::AlreadyPopulated);
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_fetch_leaves_store_empty_and_retries() {
        let remote = Arc::new(FakeRemote::new(vec![sample(1)]));
        remote.fail.store(true, Ordering::SeqCst);
        let (store, coordinator) = setup(remote.clone()).await;

        assert!(coordinator.ensure_populated().await.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(remote.calls(), 1);

        // A subsequent call retries because the store is still empty
        remote.fail.store(false, Ordering::SeqCst);
        let outcome = coordinator.ensure_populated().await.unwrap();
        assert_eq!(outcome, Populated::Fetched(1));
        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_refetches_after_store_emptied() {
        let remote = Arc::new(FakeRemote::new(vec![sample(1), sample(2)]));
        let (store, coordinator) = setup(remote.clone()).await;

        coordinator.ensure_populated().await.unwrap();
        store.delete_batch(&[1, 2]).await.unwrap();

        let outcome = coordinator.ensure_populated().await.unwrap();
        assert_eq!(outcome, Populated::Fetched(2));
        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_ingested_posts_default_unread() {
        let read_post = Post {
            read: true,
            ..sample(1)
        };
        let remote = Arc::new(FakeRemote::new(vec![read_post]));
        let (store, coordinator) = setup(remote).await;

        coordinator.ensure_populated().await.unwrap();
        assert!(!store.get(1).await.unwrap().read);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_detail_scenario() {
        // Empty store; fetch two posts; mark one read; delete the other.
        let remote = Arc::new(FakeRemote::new(vec![sample(1), sample(2)]));
        let (store, coordinator) = setup(remote).await;
        let rx = store.watch_all();

        coordinator.ensure_populated().await.unwrap();
        {
            let snapshot = rx.borrow();
            let view: Vec<(i64, bool)> = snapshot.iter().map(|p| (p.id, p.read)).collect();
            assert_eq!(view, vec![(2, false), (1, false)]);
        }

        store.mark_read(1).await.unwrap();
        {
            let snapshot = rx.borrow();
            let view: Vec<(i64, bool)> = snapshot.iter().map(|p| (p.id, p.read)).collect();
            assert_eq!(view, vec![(2, false), (1, true)]);
        }

        store.delete(2).await.unwrap();
        let snapshot = rx.borrow();
        let view: Vec<(i64, bool)> = snapshot.iter().map(|p| (p.id, p.read)).collect();
        assert_eq!(view, vec![(1, true)]);
    }
}
