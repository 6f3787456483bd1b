//! Post handlers - public reading and liking, admin authoring.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostChanges};
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn to_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        category: post.display_category().to_string(),
        created_at: post.created_at.to_rfc3339(),
        likes: post.like_count,
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    let listing = state.posts.list().await;
    let posts: Vec<PostResponse> = listing.posts.iter().map(to_response).collect();

    match listing.error {
        None => HttpResponse::Ok().json(ApiResponse::ok(posts)),
        Some(e) => {
            tracing::error!(error = %e, "Failed to load posts");
            HttpResponse::Ok().json(ApiResponse::degraded(
                posts,
                "Failed to load posts. Please try again later.",
            ))
        }
    }
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(&post)))
}

/// POST /api/posts/{id}/like
pub async fn like_post(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.increment_like(id.into_inner()).await?;
    tracing::info!(post_id = %post.id, likes = post.like_count, "Post liked");
    Ok(HttpResponse::Ok().json(to_response(&post)))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    admin.session.require()?;
    let req = body.into_inner();

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            content: req.content,
            category: req.category,
        })
        .await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(to_response(&post)))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    id: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    admin.session.require()?;
    let req = body.into_inner();

    let post = state
        .posts
        .update(
            id.into_inner(),
            PostChanges {
                title: req.title,
                content: req.content,
                category: req.category,
            },
        )
        .await?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(to_response(&post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    admin.session.require()?;
    let id = id.into_inner();

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}
