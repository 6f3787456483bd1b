//! Application state - shared across all handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use quill_core::PostStore;
use quill_core::editor::Editor;
use quill_core::ports::{AuthError, CredentialVerifier, KeyValueStore, PostRepository, TokenService};
use quill_infra::{
    Argon2CredentialVerifier, FileKeyValueStore, InMemoryKeyValueStore, InMemoryPostRepository,
    JwtTokenService, KeyValuePostRepository,
};

use crate::config::{AdminConfig, AppConfig, StorageBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
    /// The admin form. One admin, so one editor.
    pub editor: Arc<Mutex<Editor>>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: Arc<dyn TokenService>,
    /// Logged-out tokens, kept until they would have expired anyway.
    pub revoked_tokens: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let repo = build_repository(config).await;
        let credentials = build_credentials(&config.admin)?;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());

        tracing::info!(backend = ?config.storage, "Application state initialized");

        Ok(Self::with_services(
            PostStore::new(repo),
            Arc::new(credentials),
            tokens,
        ))
    }

    pub fn with_services(
        posts: PostStore,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            posts,
            editor: Arc::new(Mutex::new(Editor::new())),
            credentials,
            tokens,
            revoked_tokens: Arc::new(InMemoryKeyValueStore::new()),
        }
    }
}

fn build_credentials(admin: &AdminConfig) -> Result<Argon2CredentialVerifier, AuthError> {
    if let Some(hash) = &admin.password_hash {
        return Ok(Argon2CredentialVerifier::new(&admin.username, hash));
    }
    if let Some(password) = &admin.password {
        return Argon2CredentialVerifier::from_plain(&admin.username, password);
    }

    tracing::warn!(
        "Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set. Admin login is disabled."
    );
    Argon2CredentialVerifier::from_plain(&admin.username, &uuid::Uuid::new_v4().to_string())
}

/// Pick the post repository for the configured backend, falling back to
/// memory when the backend cannot be reached.
async fn build_repository(config: &AppConfig) -> Arc<dyn PostRepository> {
    let result = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory post storage. Posts are lost on restart.");
            return Arc::new(InMemoryPostRepository::new());
        }
        StorageBackend::File => FileKeyValueStore::open(&config.storage_dir)
            .await
            .map(|kv| Arc::new(KeyValuePostRepository::new(Arc::new(kv))) as Arc<dyn PostRepository>)
            .map_err(|e| e.to_string()),
        StorageBackend::Redis => redis_repository().await,
        StorageBackend::Postgres => postgres_repository().await,
    };

    match result {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(
                backend = ?config.storage,
                error = %e,
                "Failed to initialize post storage. Using in-memory fallback."
            );
            Arc::new(InMemoryPostRepository::new())
        }
    }
}

#[cfg(feature = "redis")]
async fn redis_repository() -> Result<Arc<dyn PostRepository>, String> {
    use quill_infra::{RedisConfig, RedisKeyValueStore};

    let kv = RedisKeyValueStore::new(RedisConfig::from_env())
        .await
        .map_err(|e| e.to_string())?;
    Ok(Arc::new(KeyValuePostRepository::new(Arc::new(kv))))
}

#[cfg(not(feature = "redis"))]
async fn redis_repository() -> Result<Arc<dyn PostRepository>, String> {
    Err("built without the redis feature".to_string())
}

#[cfg(feature = "postgres")]
async fn postgres_repository() -> Result<Arc<dyn PostRepository>, String> {
    use quill_infra::database::{DatabaseConfig, connect};
    use quill_infra::PostgresPostRepository;

    let config = DatabaseConfig::from_env().ok_or("DATABASE_URL not set")?;
    let conn = connect(&config).await.map_err(|e| e.to_string())?;
    Ok(Arc::new(PostgresPostRepository::new(conn)))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_repository() -> Result<Arc<dyn PostRepository>, String> {
    Err("built without the postgres feature".to_string())
}
