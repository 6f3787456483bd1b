use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges};
use crate::error::RepoError;

/// Post persistence contract.
///
/// Implementations must apply each mutation to a single record as one unit:
/// concurrent calls may race (last write wins) but never expose a half-applied
/// change. Missing ids on mutations are reported as [`RepoError::NotFound`].
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Insert a new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Apply author edits to an existing post.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete a post by its ID.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Add exactly one like and return the updated post.
    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError>;
}
