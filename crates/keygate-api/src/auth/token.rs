//! Token issuance and verification
//!
//! Implements HMAC-SHA256 signed tokens carrying user identity claims.
//! Access and refresh tokens are signed with distinct secrets; the
//! verifier holds the access-token key exclusively, so refresh tokens
//! never pass verification.
//!
//! Both sides are pure functions of (claims, key material, current time):
//! keys are derived once from configuration at startup and never touched
//! again.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use keygate_core::config::AuthConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in signed tokens
///
/// Wire field names follow the reference scheme (`userId`); expiry is the
/// standard `exp` claim checked at verification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User's unique identifier
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// User's display name
    pub name: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("invalid token")]
    Invalid,

    #[error("token has expired")]
    Expired,
}

/// Mints signed, time-bounded access and refresh tokens.
///
/// Keys are pre-computed from the configured secrets; construction happens
/// once at startup. No shared mutable state, thread-safe by construction.
pub struct TokenIssuer {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl: Duration::days(config.access_token_ttl_days),
            refresh_ttl: Duration::days(config.refresh_token_ttl_days),
        }
    }

    /// Sign `{userId, name}` with the access-token key; expires after the
    /// configured access lifetime (10 days by default).
    pub fn issue_access_token(&self, user_id: Uuid, name: &str) -> Result<String, TokenError> {
        self.issue(&self.access_key, self.access_ttl, user_id, name)
    }

    /// Sign the same claims with the distinct refresh-token key; expires
    /// after the configured refresh lifetime (20 days by default).
    pub fn issue_refresh_token(&self, user_id: Uuid, name: &str) -> Result<String, TokenError> {
        self.issue(&self.refresh_key, self.refresh_ttl, user_id, name)
    }

    fn issue(
        &self,
        key: &EncodingKey,
        ttl: Duration,
        user_id: Uuid,
        name: &str,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, key)?)
    }
}

/// Validates presented access tokens and extracts their claims.
///
/// Pure and stateless: signature and expiry are checked against the
/// embedded timestamp, with no I/O and no clock leeway.
pub struct TokenVerifier {
    access_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // An expiry even one second in the past must be rejected.
        validation.leeway = 0;
        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Fails with [`TokenError::Expired`] when the signature is valid but
    /// the expiry has passed, and [`TokenError::Invalid`] for everything
    /// else (bad signature, malformed structure, refresh tokens).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.access_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        Ok(data.claims)
    }
}
