//! Authentication service layer
//!
//! Business logic for registration, login, and logout. Orchestrates the
//! stores, the password hasher, and the token issuer; every outcome is an
//! explicit result mapped to the API error taxonomy.

use super::password::{hash_password, verify_password};
use super::token::TokenIssuer;
use crate::error::ApiError;
use keygate_core::model::{NewUser, PublicUser};
use keygate_core::store::{RecordOutcome, RevocationStore, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Both tokens issued by a successful login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Registration and login orchestration
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, issuer: Arc<TokenIssuer>) -> Self {
        Self { users, issuer }
    }

    /// Register a new user.
    ///
    /// Fails with `Conflict` when the email is already taken. The
    /// check-then-create here is advisory; the store's unique constraint
    /// is the authority, so a racing duplicate still maps to `Conflict`.
    pub async fn register(&self, request: RegisterRequest) -> Result<PublicUser, ApiError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(ApiError::Conflict(
                "User has already been registered".to_string(),
            ));
        }

        let secret = hash_password(&request.password)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                name: request.name,
                email: request.email,
                secret,
            })
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user.to_public())
    }

    /// Login with email and password, issuing both tokens.
    ///
    /// Fails with `NotFound` when no user matches and `Unauthenticated`
    /// when the password does not verify.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair, ApiError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("User not found. Please register first.".to_string())
            })?;

        if !verify_password(&request.password, &user.secret) {
            return Err(ApiError::Unauthenticated("Invalid credentials".to_string()));
        }

        let access_token = self
            .issuer
            .issue_access_token(user.id, &user.name)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let refresh_token = self
            .issuer
            .issue_refresh_token(user.id, &user.name)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "login successful");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

/// Logout orchestration over the revocation list
#[derive(Clone)]
pub struct LogoutService {
    revocations: Arc<dyn RevocationStore>,
}

impl LogoutService {
    pub fn new(revocations: Arc<dyn RevocationStore>) -> Self {
        Self { revocations }
    }

    /// Revoke a presented bearer token.
    ///
    /// The token string is recorded verbatim, without verifying its
    /// signature or expiry. Fails with `Unauthenticated` when no token is
    /// presented and `AlreadyRevoked` when this exact string was revoked
    /// before.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let token =
            token.ok_or_else(|| ApiError::Unauthenticated("Token not provided".to_string()))?;

        match self.revocations.record(token).await? {
            RecordOutcome::Recorded => {
                tracing::info!("token revoked");
                Ok(())
            }
            RecordOutcome::AlreadyRecorded => Err(ApiError::AlreadyRevoked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keygate_core::config::AuthConfig;
    use keygate_core::store::{MemoryRevocationStore, MemoryUserStore};

    fn auth_service() -> AuthService {
        let config = AuthConfig {
            access_token_secret: "access-secret".to_string(),
            refresh_token_secret: "refresh-secret".to_string(),
            ..Default::default()
        };
        AuthService::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(TokenIssuer::new(&config)),
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let service = auth_service();

        let user = service.register(register_request()).await.unwrap();
        assert_eq!(user.email, "ann@x.com");

        let err = service.register(register_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_not_found() {
        let service = auth_service();
        let err = service
            .login(LoginRequest {
                email: "nobody@x.com".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthenticated() {
        let service = auth_service();
        service.register(register_request()).await.unwrap();

        let err = service
            .login(LoginRequest {
                email: "ann@x.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_login_issues_two_distinct_tokens() {
        let service = auth_service();
        service.register(register_request()).await.unwrap();

        let pair = service
            .login(LoginRequest {
                email: "ann@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[tokio::test]
    async fn test_logout_ok_then_already_revoked() {
        let service = LogoutService::new(Arc::new(MemoryRevocationStore::new()));

        service.logout(Some("tok-1")).await.unwrap();
        let err = service.logout(Some("tok-1")).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyRevoked));
    }

    #[tokio::test]
    async fn test_logout_without_token_is_unauthenticated() {
        let service = LogoutService::new(Arc::new(MemoryRevocationStore::new()));
        let err = service.logout(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
