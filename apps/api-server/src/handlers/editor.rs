//! Admin editor handlers - drive the draft behind the authoring form.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::editor::Editor;
use quill_shared::dto::{DraftUpdateRequest, EditorResponse, FormatRequest};

use crate::handlers::posts::to_response;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn editor_response(editor: &Editor) -> EditorResponse {
    let draft = editor.draft();
    EditorResponse {
        editing: editor.target().map(|id| id.to_string()),
        title: draft.title.clone(),
        content: draft.content.clone(),
        category: draft.category.clone(),
    }
}

/// GET /api/admin/editor
pub async fn show(state: web::Data<AppState>, _admin: AdminIdentity) -> HttpResponse {
    let editor = state.editor.lock().await;
    HttpResponse::Ok().json(editor_response(&editor))
}

/// POST /api/admin/editor/new
pub async fn start_create(state: web::Data<AppState>, _admin: AdminIdentity) -> HttpResponse {
    let mut editor = state.editor.lock().await;
    editor.start_create();
    HttpResponse::Ok().json(editor_response(&editor))
}

/// POST /api/admin/editor/edit/{id}
pub async fn start_edit(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;

    let mut editor = state.editor.lock().await;
    editor.start_edit(post);
    Ok(HttpResponse::Ok().json(editor_response(&editor)))
}

/// PATCH /api/admin/editor/draft
pub async fn update_draft(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    body: web::Json<DraftUpdateRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let mut editor = state.editor.lock().await;

    if let Some(title) = req.title {
        editor.set_title(title);
    }
    if let Some(content) = req.content {
        editor.set_content(content);
    }
    if let Some(category) = req.category {
        editor.set_category(category);
    }

    HttpResponse::Ok().json(editor_response(&editor))
}

/// POST /api/admin/editor/format
pub async fn format(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    body: web::Json<FormatRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let mut editor = state.editor.lock().await;

    editor.apply_format(req.selection_start, req.selection_end, &req.tag);

    HttpResponse::Ok().json(editor_response(&editor))
}

/// POST /api/admin/editor/save
pub async fn save(state: web::Data<AppState>, admin: AdminIdentity) -> AppResult<HttpResponse> {
    let mut editor = state.editor.lock().await;
    let updating = editor.target().is_some();

    let post = editor.save(&admin.session, &state.posts).await?;

    tracing::info!(post_id = %post.id, updating, "Draft saved");
    if updating {
        Ok(HttpResponse::Ok().json(to_response(&post)))
    } else {
        Ok(HttpResponse::Created().json(to_response(&post)))
    }
}

/// POST /api/admin/editor/cancel
pub async fn cancel(state: web::Data<AppState>, _admin: AdminIdentity) -> HttpResponse {
    let mut editor = state.editor.lock().await;
    editor.cancel();
    HttpResponse::Ok().json(editor_response(&editor))
}
