//! Signed token minting and verification (HS256)

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Process-wide symmetric signing key
///
/// Built once at startup and handed to the token service; tests build
/// their own from any secret.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
}

impl SigningKey {
    /// Derive an HS256 key from a shared secret
    pub fn from_secret(secret: &[u8]) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Signing secret must not be empty".to_string(),
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encodes claims into a signed token
    pub fn sign(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding).map_err(|e| {
            TokenError::SigningFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Checks the signature and decodes the claims
    ///
    /// Expiry is judged against `now` rather than the wall clock, with no
    /// leeway: a token whose `exp` is not after `now` is expired.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            };
            DomainError::from(error)
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("secret", &"<redacted>")
            .finish()
    }
}
