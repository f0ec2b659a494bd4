use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::identity::{Caller, IdentityProvider};

/// Audience Supabase stamps on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Claims carried by a Supabase access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Postgres role, `authenticated` for signed-in users. Not the
    /// application role, which lives in `user_roles`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Verifies Supabase access tokens against the project's JWT secret.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        validation.validate_exp = true;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<SupabaseClaims, AuthError> {
        let data = decode::<SupabaseClaims>(token, &self.key, &self.validation).map_err(|e| {
            if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                AuthError::TokenExpired
            } else {
                AuthError::Jwt(e)
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(data.claims)
    }
}

#[async_trait]
impl IdentityProvider for JwtVerifier {
    async fn authenticate(&self, access_token: &str) -> Result<Caller, AuthError> {
        let claims = self.verify(access_token)?;
        Ok(Caller {
            id: claims.sub,
            email: claims.email,
            access_token: access_token.to_string(),
        })
    }
}
