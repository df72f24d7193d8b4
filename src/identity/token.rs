//! Signed activation tokens (HS256 JWT).
//!
//! The token names the account id and the email it was issued for, and
//! expires after the configured number of hours.

use crate::model::Account;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationClaims {
    /// Account id.
    pub sub: u32,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token was issued for another account")]
    WrongAccount,

    #[error("malformed token: {0}")]
    Malformed(String),
}

#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, TokenError> {
        self.issue_at(account, Utc::now())
    }

    /// Issues a token as if it were `now`.
    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = ActivationClaims {
            sub: account.id.0,
            email: account.email.to_lowercase(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }

    /// Accepts the token only for the account and email it was issued for.
    pub fn verify(&self, token: &str, account: &Account) -> Result<ActivationClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<ActivationClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.sub != account.id.0 || claims.email != account.email.to_lowercase() {
            return Err(TokenError::WrongAccount);
        }
        Ok(claims)
    }
}
