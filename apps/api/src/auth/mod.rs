//! Identity resolution for inbound bearer credentials.
//!
//! Tokens are issued by the external identity provider as HS256 JWTs; this
//! module only verifies them and maps the `sub` claim to an `Identity`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredential,

    #[error("Authorization header is not a bearer credential")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Resolves a bearer credential to the identity it was issued for.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub aud: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
}

pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(Identity {
            id: data.claims.sub,
            email: data.claims.email,
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedHeader)?;
    Ok(token)
}

/// Resolves the caller of a request through the configured identity provider.
pub async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Result<Identity, AuthError> {
    let token = bearer_token(headers)?;
    state.identity.resolve(token).await
}

/// Extractor for routes that require an authenticated caller. Rejects with 401.
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = resolve_caller(state, &parts.headers).await?;
        Ok(AuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue_token, TEST_AUDIENCE, TEST_SECRET};
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredential)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MalformedHeader)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let provider = JwtIdentityProvider::new(TEST_SECRET, TEST_AUDIENCE);
        let user_id = Uuid::new_v4();
        let identity = provider.resolve(&issue_token(user_id)).await.unwrap();
        assert_eq!(identity.id, user_id);
        assert_eq!(identity.email.as_deref(), Some("candidate@example.com"));
    }

    #[tokio::test]
    async fn test_wrong_secret_or_audience_is_rejected() {
        let token = issue_token(Uuid::new_v4());

        let wrong_secret = JwtIdentityProvider::new("another-secret", TEST_AUDIENCE);
        assert!(wrong_secret.resolve(&token).await.is_err());

        let wrong_audience = JwtIdentityProvider::new(TEST_SECRET, "service_role");
        assert!(wrong_audience.resolve(&token).await.is_err());
    }
}
