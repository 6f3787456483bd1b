//! In-memory post repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostChanges, newest_first};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// Posts keyed by id behind an async RwLock.
///
/// Every mutation runs under the write lock, so a read-modify-write on one
/// record never interleaves with another.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify(&self, id: Uuid, f: impl FnOnce(&mut Post) + Send) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        f(post);
        Ok(post.clone())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(newest_first);
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        posts.insert(post.id, post.clone());
        tracing::debug!(post_id = %post.id, "Post inserted");
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        self.modify(id, |post| post.apply(changes)).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => {
                tracing::debug!(post_id = %id, "Post deleted");
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError> {
        self.modify(id, |post| post.like_count += 1).await
    }
}
