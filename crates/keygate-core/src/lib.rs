//! Keygate Core - Domain models, store traits, and shared types
//!
//! This crate defines the abstractions used throughout the keygate service:
//! - User and revoked-token models
//! - Store traits (user persistence, revocation list) with in-memory
//!   implementations
//! - Configuration management

pub mod config;
pub mod model;
pub mod store;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use model::{NewUser, PublicUser, RevokedToken, User};
pub use store::{
    MemoryRevocationStore, MemoryUserStore, RecordOutcome, RevocationStore, StoreError, UserStore,
};
