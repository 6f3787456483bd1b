//! Authentication implementations.

mod credentials;
mod jwt;
mod password;

pub use credentials::Argon2CredentialVerifier;
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
