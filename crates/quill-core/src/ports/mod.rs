//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod kv_store;
mod repository;

pub use auth::{AuthError, CredentialVerifier, PasswordService, TokenClaims, TokenService};
pub use kv_store::{KeyValueStore, KvError};
pub use repository::PostRepository;
