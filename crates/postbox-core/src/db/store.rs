//! Post store: keyed persistence with live snapshot observation

use std::sync::Arc;

use async_trait::async_trait;
use libsql::params;
use tokio::sync::{watch, Mutex};

use crate::error::{Error, Result};
use crate::models::{Post, PostId};

use super::Database;

/// A full, id-descending view of the stored posts.
///
/// Snapshots are immutable and cheaply clonable; every mutation publishes a
/// fresh one, so observers never see a state between the start and end of a
/// batch.
pub type PostsSnapshot = Arc<Vec<Post>>;

/// How `upsert_batch` treats rows that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Incoming row replaces the stored row wholesale, including `read`.
    /// This matches the behavior of a plain replace-on-conflict insert.
    #[default]
    Replace,
    /// Incoming row replaces the payload fields but leaves the local
    /// `read` flag untouched.
    PreserveRead,
}

/// Trait for post storage operations
///
/// All mutations on one store instance are serialized with respect to each
/// other and atomic as a unit; `watch_all` receivers observe a strictly
/// consistent sequence of full snapshots.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Subscribe to the live id-descending view of all posts.
    ///
    /// The returned receiver holds the current snapshot immediately, even
    /// when the store is empty. Dropping it cancels only this subscription.
    fn watch_all(&self) -> watch::Receiver<PostsSnapshot>;

    /// Number of stored posts; used as a cheap existence check
    async fn count(&self) -> Result<u64>;

    /// Insert or replace posts by primary key in one transaction.
    ///
    /// Returns the storage keys of the written rows (the post ids, which
    /// are the table's rowids). On failure the prior state is retained and
    /// no snapshot is published.
    async fn upsert_batch(&self, posts: &[Post], policy: MergePolicy) -> Result<Vec<i64>>;

    /// Set `read = true` for the given id; no-op if absent
    async fn mark_read(&self, id: PostId) -> Result<()>;

    /// Set `read = true` for the given ids; missing ids are skipped
    async fn mark_read_batch(&self, ids: &[PostId]) -> Result<()>;

    /// Remove the post with the given id; no-op if absent
    async fn delete(&self, id: PostId) -> Result<()>;

    /// Remove the posts with the given ids; missing ids are skipped
    async fn delete_batch(&self, ids: &[PostId]) -> Result<()>;

    /// Point lookup; fails with [`Error::NotFound`] if absent
    async fn get(&self, id: PostId) -> Result<Post>;
}

/// libSQL implementation of [`PostStore`]
pub struct LibSqlPostStore {
    db: Arc<Database>,
    /// Serializes all statements on the shared connection. Mutations hold it
    /// across their whole transaction (snapshot publication included), and
    /// point reads take it too: a `SELECT` issued on this connection between
    /// a batch's `BEGIN` and `COMMIT` would otherwise run inside that open
    /// transaction and observe uncommitted rows.
    conn_lock: Mutex<()>,
    snapshot_tx: watch::Sender<PostsSnapshot>,
}

impl LibSqlPostStore {
    /// Create a store over an open database and seed the live view with
    /// the current contents.
    pub async fn new(db: Database) -> Result<Self> {
        let db = Arc::new(db);
        let initial = Self::load_snapshot(&db).await?;
        let (snapshot_tx, _) = watch::channel(initial);
        Ok(Self {
            db,
            conn_lock: Mutex::new(()),
            snapshot_tx,
        })
    }

    /// Open an in-memory store (primarily for tests)
    pub async fn open_in_memory() -> Result<Self> {
        Self::new(Database::open_in_memory().await?).await
    }

    async fn load_snapshot(db: &Database) -> Result<PostsSnapshot> {
        let mut rows = db
            .connection()
            .query(
                "SELECT id, user_id, title, body, read FROM posts ORDER BY id DESC",
                (),
            )
            .await?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(Self::parse_post(&row)?);
        }
        Ok(Arc::new(posts))
    }

    fn parse_post(row: &libsql::Row) -> Result<Post> {
        Ok(Post {
            id: row.get::<i64>(0)?,
            user_id: row.get::<i64>(1)?,
            title: row.get::<String>(2)?,
            body: row.get::<String>(3)?,
            read: row.get::<i32>(4)? != 0,
        })
    }

    /// Re-query and publish the live view after a completed mutation.
    async fn publish_snapshot(&self) -> Result<()> {
        let snapshot = Self::load_snapshot(&self.db).await?;
        self.snapshot_tx.send_replace(snapshot);
        Ok(())
    }

    /// Run `statement` once per id inside a single transaction.
    async fn execute_per_id(&self, statement: &str, ids: &[PostId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let _guard = self.conn_lock.lock().await;
        let conn = self.db.connection();

        conn.execute("BEGIN TRANSACTION", ()).await?;
        for id in ids {
            if let Err(e) = conn.execute(statement, params![*id]).await {
                conn.execute("ROLLBACK", ()).await.ok();
                return Err(e.into());
            }
        }
        if let Err(e) = conn.execute("COMMIT", ()).await {
            conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }

        self.publish_snapshot().await
    }
}

#[async_trait]
impl PostStore for LibSqlPostStore {
    fn watch_all(&self) -> watch::Receiver<PostsSnapshot> {
        self.snapshot_tx.subscribe()
    }

    async fn count(&self) -> Result<u64> {
        let _guard = self.conn_lock.lock().await;
        let mut rows = self
            .db
            .connection()
            .query("SELECT COUNT(*) FROM posts", ())
            .await?;

        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        u64::try_from(count).map_err(|_| Error::Storage("negative row count".into()))
    }

    async fn upsert_batch(&self, posts: &[Post], policy: MergePolicy) -> Result<Vec<i64>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let statement = match policy {
            MergePolicy::Replace => {
                "INSERT OR REPLACE INTO posts (id, user_id, title, body, read)
                 VALUES (?, ?, ?, ?, ?)"
            }
            MergePolicy::PreserveRead => {
                "INSERT INTO posts (id, user_id, title, body, read)
                 VALUES (?, ?, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                     user_id = excluded.user_id,
                     title = excluded.title,
                     body = excluded.body"
            }
        };

        let _guard = self.conn_lock.lock().await;
        let conn = self.db.connection();

        conn.execute("BEGIN TRANSACTION", ()).await?;
        let mut keys = Vec::with_capacity(posts.len());
        for post in posts {
            let result = conn
                .execute(
                    statement,
                    params![
                        post.id,
                        post.user_id,
                        post.title.as_str(),
                        post.body.as_str(),
                        i32::from(post.read)
                    ],
                )
                .await;
            if let Err(e) = result {
                conn.execute("ROLLBACK", ()).await.ok();
                return Err(e.into());
            }
            // id is the INTEGER PRIMARY KEY, i.e. the table's rowid.
            // last_insert_rowid is not updated on an ON CONFLICT update,
            // so the id itself is the reliable key either way.
            keys.push(post.id);
        }
        if let Err(e) = conn.execute("COMMIT", ()).await {
            conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }

        self.publish_snapshot().await?;
        Ok(keys)
    }

    async fn mark_read(&self, id: PostId) -> Result<()> {
        self.mark_read_batch(&[id]).await
    }

    async fn mark_read_batch(&self, ids: &[PostId]) -> Result<()> {
        self.execute_per_id("UPDATE posts SET read = 1 WHERE id = ?", ids)
            .await
    }

    async fn delete(&self, id: PostId) -> Result<()> {
        self.delete_batch(&[id]).await
    }

    async fn delete_batch(&self, ids: &[PostId]) -> Result<()> {
        self.execute_per_id("DELETE FROM posts WHERE id = ?", ids)
            .await
    }

    async fn get(&self, id: PostId) -> Result<Post> {
        let _guard = self.conn_lock.lock().await;
        let mut rows = self
            .db
            .connection()
            .query(
                "SELECT id, user_id, title, body, read FROM posts WHERE id = ?",
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Self::parse_post(&row),
            None => Err(Error::NotFound(id)),
        }
    }
}
