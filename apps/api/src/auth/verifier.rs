//! Token verification — pluggable, trait-based collaborator that turns a raw
//! bearer token into verified [`AccessClaims`].
//!
//! Default: `HsTokenVerifier` (local HS256 check against the shared secret
//! injected via config). The trait is async so a remote introspection backend
//! against the auth service can be swapped in without touching the extractor.
//!
//! `AppState` holds an `Arc<dyn TokenVerifier>`, built at startup.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::auth::claims::AccessClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token is not an access token")]
    NotAccessToken,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenError>;
}

/// Verifies tokens locally with the HS256 secret shared with the auth service.
pub struct HsTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl HsTokenVerifier {
    /// The secret, issuer and audience come from config — never from ambient
    /// global state.
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    fn decode_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.token_type != "access" {
            return Err(TokenError::NotAccessToken);
        }
        Ok(data.claims)
    }
}

#[async_trait]
impl TokenVerifier for HsTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode_access_token(token)
    }
}
