use crate::error::DomainError;
use crate::ports::{AuthError, CredentialVerifier};

/// Explicit admin session passed to whatever needs to authorize authoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    subject: Option<String>,
}

impl AdminSession {
    /// A session that has not passed a credential check.
    pub fn anonymous() -> Self {
        Self { subject: None }
    }

    /// A session for an already verified admin (e.g. from a validated token).
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
        }
    }

    /// Check credentials and open a session on success.
    pub fn sign_in(
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        if verifier.verify(username, password)? {
            Ok(Self::authenticated(username))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.subject.is_some()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn require(&self) -> Result<(), DomainError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
