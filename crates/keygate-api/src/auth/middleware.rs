//! Authentication middleware for protecting routes
//!
//! One pass per request, terminal at the first failure: extract the
//! bearer token, verify signature and expiry, reject revoked tokens, then
//! attach the authenticated identity to request extensions for downstream
//! handlers. Store failures inside the gate surface as 500, distinct from
//! the 401 credential failures.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated identity extracted from a verified token
///
/// Added to request extensions by [`auth_middleware`]; handlers pull it
/// out with `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
}

/// Read the token out of an `Authorization: Bearer <token>` header.
///
/// Returns `None` for a missing header, a non-UTF-8 value, or a missing
/// `Bearer` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Gate for protected routes.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthenticated("Token not provided".to_string()))?;

    let claims = state
        .verifier
        .verify(token)
        .map_err(|_| ApiError::Unauthenticated("Invalid credentials".to_string()))?;

    // A revoked token is rejected even while its embedded expiry is still
    // in the future. Lookup failure is an internal fault, not a 401.
    if state.revocations.contains(token).await? {
        return Err(ApiError::Unauthenticated(
            "Token has been revoked".to_string(),
        ));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        name: claims.name,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_requires_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
