//! Authentication and token lifecycle module
//!
//! - Token issuance and verification (HMAC-signed, dual secrets)
//! - Password hashing with Argon2
//! - Middleware gating protected requests
//! - Registration/login and logout services

pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::{auth_middleware, bearer_token, AuthenticatedUser};
pub use password::{hash_password, verify_password};
pub use service::{AuthService, LoginRequest, LogoutService, RegisterRequest, TokenPair};
pub use token::{Claims, TokenError, TokenIssuer, TokenVerifier};
