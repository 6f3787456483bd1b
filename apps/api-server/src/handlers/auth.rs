//! Authentication handlers.

use std::time::Duration;

use actix_web::{HttpResponse, web};

use quill_core::domain::AdminSession;
use quill_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::auth::{ADMIN_ROLE, AdminIdentity, AuthenticationError, revocation_key};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthenticationError> {
    let req = body.into_inner();

    let session = AdminSession::sign_in(state.credentials.as_ref(), &req.username, &req.password)
        .map_err(|e| {
            tracing::warn!("Admin login rejected");
            AuthenticationError(e)
        })?;

    let subject = session.subject().unwrap_or_default();
    let token = state
        .tokens
        .generate_token(subject, vec![ADMIN_ROLE.to_string()])
        .map_err(AuthenticationError)?;

    tracing::info!(admin = %subject, "Admin logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}

/// POST /api/auth/logout
pub async fn logout(state: web::Data<AppState>, admin: AdminIdentity) -> AppResult<HttpResponse> {
    let AdminIdentity {
        session,
        token,
        expires_at,
    } = admin;

    let remaining = (expires_at - chrono::Utc::now().timestamp()).max(1) as u64;
    state
        .revoked_tokens
        .set(&revocation_key(&token), "1", Some(Duration::from_secs(remaining)))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(admin = %session.subject().unwrap_or_default(), "Admin logged out");

    Ok(HttpResponse::NoContent().finish())
}
