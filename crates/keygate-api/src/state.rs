//! Application state shared across handlers
//!
//! Built once at startup from the loaded configuration and the chosen
//! store backends; read-only afterwards. Signing keys are derived here,
//! never read from the environment at request time.

use crate::auth::{AuthService, LogoutService, TokenIssuer, TokenVerifier};
use keygate_core::config::AppConfig;
use keygate_core::store::{RevocationStore, UserStore};
use std::sync::Arc;

pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Registration and login orchestration
    pub auth: AuthService,
    /// Logout orchestration
    pub logout: LogoutService,
    /// Access-token verifier used by the gate
    pub verifier: TokenVerifier,
    /// Revocation list, consulted by the gate
    pub revocations: Arc<dyn RevocationStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let issuer = Arc::new(TokenIssuer::new(&config.auth));
        let verifier = TokenVerifier::new(&config.auth);

        Self {
            auth: AuthService::new(users, issuer),
            logout: LogoutService::new(revocations.clone()),
            verifier,
            revocations,
            config,
        }
    }
}
