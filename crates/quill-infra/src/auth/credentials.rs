//! Admin credential check against a configured username and Argon2 hash.

use quill_core::ports::{AuthError, CredentialVerifier, PasswordService};

use super::Argon2PasswordService;

/// The single admin account, configured at startup.
pub struct Argon2CredentialVerifier {
    username: String,
    password_hash: String,
    passwords: Argon2PasswordService,
}

impl Argon2CredentialVerifier {
    /// Use an existing Argon2 PHC hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            passwords: Argon2PasswordService::new(),
        }
    }

    /// Hash a plain password once at startup.
    pub fn from_plain(username: impl Into<String>, password: &str) -> Result<Self, AuthError> {
        let passwords = Argon2PasswordService::new();
        let password_hash = passwords.hash(password)?;
        Ok(Self {
            username: username.into(),
            password_hash,
            passwords,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if username != self.username {
            tracing::debug!("Login attempt for unknown admin user");
            return Ok(false);
        }
        self.passwords.verify(password, &self.password_hash)
    }
}
