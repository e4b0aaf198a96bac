//! Store traits for users and the token revocation list
//!
//! The persistence engine is an external collaborator: this module only
//! specifies the operations the service needs from it, plus in-memory
//! implementations used in tests and in single-instance deployments
//! without a database.
//!
//! Concurrency contract: `UserStore::create` and `RevocationStore::record`
//! provide at-most-one-success-per-unique-key semantics under concurrent
//! identical calls. The in-memory implementations get this from a single
//! mutex guard around check-and-insert; database implementations must get
//! it from an atomic insert or unique constraint.

use crate::model::{NewUser, RevokedToken, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("store error: {0}")]
    Backend(String),
}

/// Outcome of recording a token in the revocation list.
///
/// Exactly one caller observes `Recorded` for a given token string, even
/// when calls race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    AlreadyRecorded,
}

/// Persistence operations for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email. No side effects.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Create a user, assigning its id. Fails with
    /// [`StoreError::DuplicateEmail`] if the email is already taken; the
    /// store is the authority on the unique constraint.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

/// Persistence operations for the token revocation list
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Membership query for a raw token string.
    async fn contains(&self, token: &str) -> Result<bool, StoreError>;

    /// Record a token as revoked. Idempotent: recording the same token
    /// twice reports [`RecordOutcome::AlreadyRecorded`] the second time.
    async fn record(&self, token: &str) -> Result<RecordOutcome, StoreError>;

    /// Delete entries recorded before `cutoff`. Revocations need not
    /// outlive the longest token lifetime, so callers prune with
    /// `now - max_token_ttl`. Returns the number of entries removed.
    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// In-memory user store, keyed by email
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.get(email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        // Check and insert under one guard: the uniqueness check is atomic
        // with respect to a given email.
        if users.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email.clone(),
            secret: new_user.secret,
            created_at: Utc::now(),
        };
        users.insert(new_user.email, user.clone());
        Ok(user)
    }
}

/// In-memory revocation list
#[derive(Default)]
pub struct MemoryRevocationStore {
    revoked: Mutex<HashMap<String, RevokedToken>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn contains(&self, token: &str) -> Result<bool, StoreError> {
        let revoked = self.revoked.lock().map_err(poisoned)?;
        Ok(revoked.contains_key(token))
    }

    async fn record(&self, token: &str) -> Result<RecordOutcome, StoreError> {
        let mut revoked = self.revoked.lock().map_err(poisoned)?;
        if revoked.contains_key(token) {
            return Ok(RecordOutcome::AlreadyRecorded);
        }
        revoked.insert(
            token.to_string(),
            RevokedToken {
                token: token.to_string(),
                recorded_at: Utc::now(),
            },
        );
        Ok(RecordOutcome::Recorded)
    }

    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut revoked = self.revoked.lock().map_err(poisoned)?;
        let before = revoked.len();
        revoked.retain(|_, entry| entry.recorded_at >= cutoff);
        Ok((before - revoked.len()) as u64)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend("store mutex poisoned".to_string())
}
