use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("access denied")]
    AccessDenied,

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// True when the caller simply is not authenticated, as opposed to the
    /// identity service failing.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::TokenExpired
                | AuthError::InvalidToken(_)
                | AuthError::Jwt(_)
        )
    }
}
