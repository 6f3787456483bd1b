//! Admin authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::AdminSession;
use quill_core::ports::AuthError;

use crate::state::AppState;

/// Role carried by admin tokens.
pub const ADMIN_ROLE: &str = "admin";

/// Key under which a logged-out token is remembered.
pub fn revocation_key(token: &str) -> String {
    format!("revoked:{token}")
}

/// Authenticated admin, built from a valid, non-revoked bearer token.
///
/// Use this in handlers to require an admin:
/// ```ignore
/// async fn protected_route(admin: AdminIdentity) -> impl Responder {
///     format!("Hello, {}!", admin.session.subject().unwrap_or_default())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub session: AdminSession,
    pub token: String,
    /// Token expiry as a unix timestamp.
    pub expires_at: i64,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::InvalidToken(_)
            | AuthError::MissingAuth
            | AuthError::InvalidCredentials => actix_web::http::StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => actix_web::http::StatusCode::FORBIDDEN,
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use quill_shared::ErrorResponse;

        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your session has expired. Please login again."),
            AuthError::TokenRevoked => ErrorResponse::new(401, "Token Revoked")
                .with_detail("This session was logged out. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidCredentials => {
                ErrorResponse::unauthorized().with_detail("Invalid credentials")
            }
            AuthError::InsufficientPermissions => ErrorResponse::forbidden(),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for AdminIdentity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                )));
            };
            let token = token.map_err(AuthenticationError)?;

            let claims = state
                .tokens
                .validate_token(&token)
                .map_err(AuthenticationError)?;

            if !claims.roles.iter().any(|r| r == ADMIN_ROLE) {
                return Err(AuthenticationError(AuthError::InsufficientPermissions));
            }

            if state.revoked_tokens.exists(&revocation_key(&token)).await {
                return Err(AuthenticationError(AuthError::TokenRevoked));
            }

            Ok(AdminIdentity {
                session: AdminSession::authenticated(claims.subject),
                token,
                expires_at: claims.exp,
            })
        })
    }
}
