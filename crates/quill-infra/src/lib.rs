//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! post repositories, key-value stores and authentication services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory and file storage only
//! - `postgres` - PostgreSQL post repository via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `redis` - Redis key-value store

pub mod kv;
pub mod repository;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - always available
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};
pub use repository::{InMemoryPostRepository, KeyValuePostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2CredentialVerifier, Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "redis")]
pub use kv::{RedisConfig, RedisKeyValueStore};
