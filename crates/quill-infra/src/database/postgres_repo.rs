//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::blog::{self, Entity as BlogEntity};

/// PostgreSQL post repository over the `blogs` table.
///
/// Updates and likes run as a single `UPDATE ... RETURNING` statement, so the
/// database serializes concurrent writes to the same row.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err_str),
        _ if err_str.contains("duplicate") || err_str.contains("unique") => {
            RepoError::Constraint("Post already exists".to_string())
        }
        _ => RepoError::Query(err_str),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let result = BlogEntity::find()
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_desc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active_model: blog::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        tracing::debug!(post_id = %model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        if changes.is_empty() {
            return self.find_by_id(id).await?.ok_or(RepoError::NotFound);
        }

        let mut query = BlogEntity::update_many().filter(blog::Column::Id.eq(id));
        if let Some(title) = changes.title {
            query = query.col_expr(blog::Column::Title, Expr::value(title));
        }
        if let Some(content) = changes.content {
            query = query.col_expr(blog::Column::Content, Expr::value(content));
        }
        if let Some(category) = changes.category {
            query = query.col_expr(blog::Column::Category, Expr::value(category));
        }

        let rows = query
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BlogEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError> {
        let rows = BlogEntity::update_many()
            .col_expr(blog::Column::Likes, Expr::col(blog::Column::Likes).add(1))
            .filter(blog::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(query_error)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }
}
