//! Post Store - the authoritative collection of posts.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Result of a listing. A failed read degrades to an empty list and keeps the
/// error alongside so the caller can still report it.
#[derive(Debug, Default)]
pub struct PostListing {
    pub posts: Vec<Post>,
    pub error: Option<DomainError>,
}

/// Validating facade over a [`PostRepository`].
#[derive(Clone)]
pub struct PostStore {
    repo: Arc<dyn PostRepository>,
}

impl PostStore {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts, newest first. Never fails.
    pub async fn list(&self) -> PostListing {
        match self.repo.list_newest_first().await {
            Ok(posts) => PostListing { posts, error: None },
            Err(e) => PostListing {
                posts: Vec::new(),
                error: Some(DomainError::Persistence(e)),
            },
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, fields: NewPost) -> Result<Post, DomainError> {
        let fields = fields.validate()?;
        Ok(self.repo.insert(Post::new(fields)).await?)
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        changes.validate()?;
        if changes.is_empty() {
            return self.get(id).await;
        }

        self.repo
            .update(id, changes)
            .await
            .map_err(|e| DomainError::from_repo(e, id))
    }

    /// Remove a post. Deleting an id that is already gone is `NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, id))
    }

    pub async fn increment_like(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .increment_likes(id)
            .await
            .map_err(|e| DomainError::from_repo(e, id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::newest_first;
    use crate::error::RepoError;

    /// Vec-backed repository whose writes can be switched to fail.
    #[derive(Default)]
    pub(crate) struct VecRepository {
        posts: Mutex<Vec<Post>>,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
    }

    impl VecRepository {
        fn check_write(&self) -> Result<(), RepoError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RepoError::Connection("storage offline".to_string()));
            }
            Ok(())
        }

        fn modify(&self, id: Uuid, f: impl FnOnce(&mut Post)) -> Result<Post, RepoError> {
            self.check_write()?;
            let mut posts = self.posts.lock().unwrap();
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            f(post);
            Ok(post.clone())
        }
    }

    #[async_trait]
    impl PostRepository for VecRepository {
        async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(RepoError::Query("read failed".to_string()));
            }
            let mut posts = self.posts.lock().unwrap().clone();
            posts.sort_by(newest_first);
            Ok(posts)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            self.check_write()?;
            self.posts.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
            self.modify(id, |post| post.apply(changes))
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.check_write()?;
            let mut posts = self.posts.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            if posts.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }

        async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError> {
            self.modify(id, |post| post.like_count += 1)
        }
    }

    pub(crate) fn store() -> (PostStore, Arc<VecRepository>) {
        let repo = Arc::new(VecRepository::default());
        (PostStore::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (store, _) = store();

        let created = store
            .create(NewPost::new("First", "Hello").with_category("Life"))
            .await
            .unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "First");
        assert_eq!(fetched.content, "Hello");
        assert_eq!(fetched.category.as_deref(), Some("Life"));
        assert_eq!(fetched.like_count, 0);
    }

    #[tokio::test]
    async fn test_create_accepts_whitespace_title() {
        let (store, _) = store();

        let created = store.create(NewPost::new("   ", "body")).await.unwrap();

        assert_eq!(store.get(created.id).await.unwrap().title, "   ");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let (store, _) = store();

        let result = store.create(NewPost::new("Title", "")).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.list().await.posts.is_empty());
    }

    #[tokio::test]
    async fn test_likes_increase_by_one() {
        let (store, _) = store();
        let post = store.create(NewPost::new("Liked", "Body")).await.unwrap();

        for expected in 1..=5 {
            let updated = store.increment_like(post.id).await.unwrap();
            assert_eq!(updated.like_count, expected);
        }
        assert_eq!(store.get(post.id).await.unwrap().like_count, 5);
    }

    #[tokio::test]
    async fn test_double_delete_is_not_found() {
        let (store, _) = store();
        let post = store.create(NewPost::new("Gone", "Soon")).await.unwrap();

        store.delete(post.id).await.unwrap();

        assert!(matches!(
            store.get(post.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(post.id).await,
            Err(DomainError::NotFound { id, .. }) if id == post.id
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_for_any_insertion_order() {
        let (store, repo) = store();
        let now = Utc::now();

        for offset in [3, 0, 5, 1, 4, 2] {
            let mut post = Post::new(NewPost::new(format!("post {offset}"), "body"));
            post.created_at = now - Duration::minutes(offset);
            repo.insert(post).await.unwrap();
        }

        let listing = store.list().await;
        let titles: Vec<_> = listing.posts.iter().map(|p| p.title.as_str()).collect();

        assert!(listing.error.is_none());
        assert_eq!(
            titles,
            vec!["post 0", "post 1", "post 2", "post 3", "post 4", "post 5"]
        );
    }

    #[tokio::test]
    async fn test_list_degrades_to_empty_on_read_error() {
        let (store, repo) = store();
        store.create(NewPost::new("Hidden", "Body")).await.unwrap();
        repo.fail_reads.store(true, Ordering::SeqCst);

        let listing = store.list().await;

        assert!(listing.posts.is_empty());
        assert!(matches!(listing.error, Some(DomainError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_update_missing_post_leaves_collection_unchanged() {
        let (store, _) = store();
        store.create(NewPost::new("Keep", "Me")).await.unwrap();
        let before = store.list().await.posts;

        let result = store
            .update(
                Uuid::new_v4(),
                PostChanges {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(store.list().await.posts, before);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at_and_likes() {
        let (store, _) = store();
        let post = store.create(NewPost::new("Draft", "Body")).await.unwrap();
        store.increment_like(post.id).await.unwrap();

        let updated = store
            .update(
                post.id,
                PostChanges {
                    title: Some("Final".to_string()),
                    content: Some("New body".to_string()),
                    category: Some("Tech".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.created_at, post.created_at);
        assert_eq!(updated.like_count, 1);
    }

    #[tokio::test]
    async fn test_update_with_empty_title_is_rejected() {
        let (store, _) = store();
        let post = store.create(NewPost::new("Title", "Body")).await.unwrap();

        let result = store
            .update(
                post.id,
                PostChanges {
                    title: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.get(post.id).await.unwrap().title, "Title");
    }

    #[tokio::test]
    async fn test_failed_write_is_not_observable() {
        let (store, repo) = store();
        let post = store.create(NewPost::new("Stable", "Body")).await.unwrap();
        repo.fail_writes.store(true, Ordering::SeqCst);

        assert!(matches!(
            store.increment_like(post.id).await,
            Err(DomainError::Persistence(_))
        ));
        assert!(matches!(
            store.create(NewPost::new("Lost", "Body")).await,
            Err(DomainError::Persistence(_))
        ));

        let listing = store.list().await;
        assert_eq!(listing.posts, vec![post]);
    }

    #[tokio::test]
    async fn test_omitted_category_reads_as_uncategorized() {
        let (store, _) = store();
        let post = store.create(NewPost::new("Plain", "Body")).await.unwrap();

        let fetched = store.get(post.id).await.unwrap();

        assert_eq!(fetched.category, None);
        assert_eq!(fetched.display_category(), "Uncategorized");
    }
}
