use std::fmt;

use async_trait::async_trait;
use scorly_core::models::role::UserRole;

use crate::error::AuthError;

/// The authenticated caller of a request.
///
/// The access token is kept so that calls made on the caller's behalf can
/// forward it and stay subject to the store's row-level security.
#[derive(Clone)]
pub struct Caller {
    pub id: String,
    pub email: Option<String>,
    pub access_token: String,
}

impl Caller {
    pub fn new(id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caller")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Resolves a bearer token to a caller.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fails with an unauthenticated [`AuthError`] for invalid or expired
    /// tokens, and with [`AuthError::Provider`] when the service itself fails.
    async fn authenticate(&self, access_token: &str) -> Result<Caller, AuthError>;
}

/// Looks up the role row of a caller.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// `Ok(None)` means the caller has no role row.
    async fn role_of(&self, caller: &Caller) -> Result<Option<UserRole>, AuthError>;
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
/// The scheme name is matched case-insensitively.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|h| h.trim_start().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .ok_or(AuthError::MissingCredential)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}
