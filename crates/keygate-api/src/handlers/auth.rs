//! Authentication HTTP handlers
//!
//! Explicit request/response record types per endpoint; field names match
//! the wire format consumers already depend on (`newUser`, `token`,
//! `refreshToken`).

use crate::auth::{bearer_token, AuthenticatedUser, LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use keygate_core::model::PublicUser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(rename = "newUser")]
    pub new_user: PublicUser,
}

/// Login response carrying both issued tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Bare message response (logout, protected probe)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /register
///
/// 201 with the created user (secret projected out), 400 when the email
/// is already registered.
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_user = state.auth.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            new_user,
        }),
    ))
}

/// POST /login
///
/// 200 with access and refresh tokens, 404 for an unknown email, 401 for
/// a bad password.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// GET /logout
///
/// Records the presented bearer token on the revocation list. Not gated:
/// the token is revoked verbatim without signature or expiry checks, so
/// 401 here means only that no token was presented. 400 when the token
/// was already invalidated.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    state.logout.logout(bearer_token(&headers)).await?;

    Ok(Json(MessageResponse {
        message: "Logout successfully".to_string(),
    }))
}

/// GET /auth, the protected probe behind the gate
pub async fn auth_probe_handler(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Authenticated as {}", user.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_register_response_wire_format() {
        let response = RegisterResponse {
            message: "User registered successfully".to_string(),
            new_user: PublicUser {
                id: Uuid::new_v4(),
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"newUser\""));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_login_response_wire_format() {
        let response = LoginResponse {
            message: "Login successful".to_string(),
            token: "a.b.c".to_string(),
            refresh_token: "d.e.f".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"refreshToken\":\"d.e.f\""));
        assert!(json.contains("\"token\":\"a.b.c\""));
    }
}
