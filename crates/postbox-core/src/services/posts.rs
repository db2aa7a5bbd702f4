//! Post service: the single boundary between observers/mutators and the store.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::db::{MergePolicy, PostStore, PostsSnapshot};
use crate::error::Result;
use crate::models::{Post, PostId};
use crate::remote::RemoteSource;
use crate::sync::{Populated, SyncCoordinator};

/// Thread-safe facade over the post store and sync coordinator.
///
/// Holds no state of its own beyond the shared handles; cloning is cheap and
/// every clone talks to the same store. Mutations and sync triggers are
/// spawned as independent tasks: callers that care about the outcome await
/// the returned handle, callers that don't may drop it — errors are logged
/// either way, and the live view is the source of truth for the result.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    coordinator: Arc<SyncCoordinator>,
}

impl PostService {
    /// Create a service over the given store and remote source.
    pub fn new(
        store: Arc<dyn PostStore>,
        remote: Arc<dyn RemoteSource>,
        policy: MergePolicy,
    ) -> Self {
        let coordinator = Arc::new(SyncCoordinator::new(store.clone(), remote, policy));
        Self { store, coordinator }
    }

    /// Subscribe to the live id-descending view of all posts.
    ///
    /// Each call yields an independent subscription; dropping one receiver
    /// does not affect the others.
    pub fn observe(&self) -> watch::Receiver<PostsSnapshot> {
        self.store.watch_all()
    }

    /// Kick off a populate check without blocking the caller.
    ///
    /// Typically invoked at view-attach time, where there is no recovery
    /// path; failures are logged and also surfaced through the handle for
    /// callers that choose to await it.
    pub fn trigger_sync(&self) -> JoinHandle<Result<Populated>> {
        let coordinator = self.coordinator.clone();
        tokio::spawn(async move {
            let result = coordinator.ensure_populated().await;
            if let Err(error) = &result {
                tracing::warn!(%error, "Background sync failed");
            }
            result
        })
    }

    /// Mark a single post read.
    pub fn mark_read(&self, id: PostId) -> JoinHandle<Result<()>> {
        self.mark_read_batch(vec![id])
    }

    /// Mark several posts read in one atomic batch.
    pub fn mark_read_batch(&self, ids: Vec<PostId>) -> JoinHandle<Result<()>> {
        let store = self.store.clone();
        tokio::spawn(async move {
            let result = store.mark_read_batch(&ids).await;
            if let Err(error) = &result {
                tracing::warn!(%error, ?ids, "Failed to mark posts read");
            }
            result
        })
    }

    /// Delete a single post.
    pub fn delete(&self, id: PostId) -> JoinHandle<Result<()>> {
        self.delete_batch(vec![id])
    }

    /// Delete several posts in one atomic batch.
    pub fn delete_batch(&self, ids: Vec<PostId>) -> JoinHandle<Result<()>> {
        let store = self.store.clone();
        tokio::spawn(async move {
            let result = store.delete_batch(&ids).await;
            if let Err(error) = &result {
                tracing::warn!(%error, ?ids, "Failed to delete posts");
            }
            result
        })
    }

    /// Point lookup for the detail view; propagates `NotFound`.
    pub async fn get(&self, id: PostId) -> Result<Post> {
        self.store.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LibSqlPostStore;
    use crate::error::Error;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct FakeRemote {
        posts: Vec<Post>,
        fail: bool,
    }

    #[async_trait]
    impl RemoteSource for FakeRemote {
        async fn fetch_all(&self) -> Result<Vec<Post>> {
            if self.fail {
                return Err(Error::Api("HTTP 500".to_string()));
            }
            Ok(self.posts.clone())
        }
    }

    fn sample(id: PostId) -> Post {
        Post::new(id, 1, format!("T{id}"), format!("B{id}"))
    }

    async fn service_with(posts: Vec<Post>, fail: bool) -> PostService {
        let store = Arc::new(LibSqlPostStore::open_in_memory().await.unwrap());
        let remote = Arc::new(FakeRemote { posts, fail });
        PostService::new(store, remote, MergePolicy::Replace)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_trigger_sync_populates_observed_view() {
        let service = service_with(vec![sample(1), sample(2)], false).await;
        let mut rx = service.observe();
        assert!(rx.borrow().is_empty());

        let outcome = service.trigger_sync().await.unwrap().unwrap();
        assert_eq!(outcome, Populated::Fetched(2));

        rx.changed().await.unwrap();
        let ids: Vec<PostId> = rx.borrow().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_trigger_sync_surfaces_error_through_handle() {
        let service = service_with(vec![], true).await;
        let result = service.trigger_sync().await.unwrap();
        assert!(matches!(result, Err(Error::Api(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mark_read_and_delete_reflected_in_view() {
        let service = service_with(vec![sample(1), sample(2)], false).await;
        service.trigger_sync().await.unwrap().unwrap();

        service.mark_read(1).await.unwrap().unwrap();
        assert!(service.get(1).await.unwrap().read);

        service.delete_batch(vec![1, 2]).await.unwrap().unwrap();
        let rx = service.observe();
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_dropped_handle_still_applies_mutation() {
        let service = service_with(vec![sample(1)], false).await;
        service.trigger_sync().await.unwrap().unwrap();

        let mut rx = service.observe();
        // Fire and forget: the task runs to completion without the handle
        drop(service.mark_read(1));

        rx.changed().await.unwrap();
        assert!(rx.borrow()[0].read);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_observers_are_independent() {
        let service = service_with(vec![sample(1)], false).await;
        let mut rx_a = service.observe();
        let rx_b = service.observe();
        drop(rx_b);

        service.trigger_sync().await.unwrap().unwrap();
        rx_a.changed().await.unwrap();
        assert_eq!(rx_a.borrow().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_missing_propagates_not_found() {
        let service = service_with(vec![], false).await;
        let err = service.get(7).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
