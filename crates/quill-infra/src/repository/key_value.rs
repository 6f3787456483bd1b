//! Post repository that keeps the whole collection as one serialized value.
//!
//! This is the "local storage" layout: a JSON array of posts under a single
//! fixed key. Works on top of any [`KeyValueStore`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use quill_core::domain::{Post, PostChanges, newest_first};
use quill_core::error::RepoError;
use quill_core::ports::{KeyValueStore, KvError, PostRepository};

/// Key the collection is stored under.
pub const COLLECTION_KEY: &str = "blogs";

pub struct KeyValuePostRepository {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    /// Serializes load-modify-save cycles.
    write_lock: Mutex<()>,
}

impl KeyValuePostRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, COLLECTION_KEY)
    }

    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Post>, RepoError> {
        let raw = self.kv.get(&self.key).await.map_err(kv_error)?;
        match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                tracing::error!(
                    key = %self.key,
                    error = %e,
                    "Stored post collection is unreadable"
                );
                RepoError::Serialization(e.to_string())
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, posts: &[Post]) -> Result<(), RepoError> {
        let raw =
            serde_json::to_string(posts).map_err(|e| RepoError::Serialization(e.to_string()))?;
        self.kv.set(&self.key, &raw, None).await.map_err(kv_error)
    }

    /// Load, mutate one record, and write the collection back.
    ///
    /// The stored value is only replaced once the write succeeds, so a failed
    /// save leaves the previous collection in place.
    async fn modify(&self, id: Uuid, f: impl FnOnce(&mut Post) + Send) -> Result<Post, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        f(post);
        let updated = post.clone();
        self.save(&posts).await?;
        Ok(updated)
    }
}

fn kv_error(err: KvError) -> RepoError {
    match err {
        KvError::Connection(msg) => RepoError::Connection(msg),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl PostRepository for KeyValuePostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.load().await?;
        posts.sort_by(newest_first);
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        posts.push(post.clone());
        self.save(&posts).await?;
        tracing::debug!(post_id = %post.id, key = %self.key, "Post inserted");
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        self.modify(id, |post| post.apply(changes)).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        self.save(&posts).await?;
        tracing::debug!(post_id = %id, key = %self.key, "Post deleted");
        Ok(())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError> {
        self.modify(id, |post| post.like_count += 1).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use chrono::Utc;
    use quill_core::domain::NewPost;

    use super::*;
    use crate::kv::{FileKeyValueStore, InMemoryKeyValueStore};

    /// Wraps a store and fails every write while `offline` is set.
    struct FlakyStore {
        inner: InMemoryKeyValueStore,
        offline: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), KvError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(KvError::Operation("quota exceeded".to_string()));
            }
            self.inner.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> Result<(), KvError> {
            self.inner.delete(key).await
        }
    }

    fn repo() -> KeyValuePostRepository {
        KeyValuePostRepository::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        assert!(repo().list_newest_first().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collection_is_one_json_array() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValuePostRepository::new(kv.clone());
        let post = repo
            .insert(Post::new(NewPost::new("Stored", "Body")))
            .await
            .unwrap();

        let raw = kv.get(COLLECTION_KEY).await.unwrap().unwrap();
        let stored: Vec<Post> = serde_json::from_str(&raw).unwrap();

        assert_eq!(stored, vec![post]);
        assert!(raw.contains("\"likes\":0"));
    }

    #[tokio::test]
    async fn test_reads_legacy_collection() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.set(
            COLLECTION_KEY,
            r#"[{"id":"3d1fa1f4-8f0c-4b5e-9a59-0c3f6a4d2b10","title":"Old","content":"Post","created_at":"2023-01-01T00:00:00Z"}]"#,
            None,
        )
        .await
        .unwrap();
        let repo = KeyValuePostRepository::new(kv);

        let posts = repo.list_newest_first().await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].like_count, 0);
        assert_eq!(posts[0].display_category(), "Uncategorized");
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let repo = repo();
        let now = Utc::now();
        for minutes in [10, 30, 20] {
            let mut post = Post::new(NewPost::new(format!("{minutes}m ago"), "Body"));
            post.created_at = now - chrono::Duration::minutes(minutes);
            repo.insert(post).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["10m ago", "20m ago", "30m ago"]);
    }

    #[tokio::test]
    async fn test_update_rewrites_stored_collection() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValuePostRepository::new(kv.clone());
        let post = repo
            .insert(Post::new(NewPost::new("Draft", "Body")))
            .await
            .unwrap();
        repo.increment_likes(post.id).await.unwrap();

        let updated = repo
            .update(
                post.id,
                PostChanges {
                    title: Some("Published".to_string()),
                    category: Some("Notes".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Published");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.like_count, 1);
        assert_eq!(updated.created_at, post.created_at);

        let raw = kv.get(COLLECTION_KEY).await.unwrap().unwrap();
        let stored: Vec<Post> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_missing_post_leaves_collection() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValuePostRepository::new(kv.clone());
        repo.insert(Post::new(NewPost::new("Only", "Body")))
            .await
            .unwrap();
        let before = kv.get(COLLECTION_KEY).await.unwrap();

        let result = repo
            .update(
                Uuid::new_v4(),
                PostChanges {
                    title: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
        assert_eq!(kv.get(COLLECTION_KEY).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_collection() {
        let kv = Arc::new(FlakyStore {
            inner: InMemoryKeyValueStore::new(),
            offline: AtomicBool::new(false),
        });
        let repo = KeyValuePostRepository::new(kv.clone());
        let post = repo
            .insert(Post::new(NewPost::new("Safe", "Body")))
            .await
            .unwrap();

        kv.offline.store(true, Ordering::SeqCst);
        assert!(repo.increment_likes(post.id).await.is_err());
        assert!(repo.delete(post.id).await.is_err());

        let stored = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(stored.like_count, 0);
    }

    #[tokio::test]
    async fn test_file_backed_collection_persists() {
        let dir = tempfile::tempdir().unwrap();
        let post = {
            let kv = Arc::new(FileKeyValueStore::open(dir.path()).await.unwrap());
            let repo = KeyValuePostRepository::new(kv);
            let post = repo
                .insert(Post::new(NewPost::new("Durable", "Body")))
                .await
                .unwrap();
            repo.increment_likes(post.id).await.unwrap()
        };

        let kv = Arc::new(FileKeyValueStore::open(dir.path()).await.unwrap());
        let repo = KeyValuePostRepository::new(kv);
        let reloaded = repo.find_by_id(post.id).await.unwrap().unwrap();

        assert_eq!(reloaded.like_count, 1);
        repo.delete(post.id).await.unwrap();
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
    }
}
