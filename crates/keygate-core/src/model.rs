//! Domain models for the credential and token lifecycle
//!
//! - [`User`]: an identity record with a hashed password secret
//! - [`RevokedToken`]: one previously issued token string marked unusable
//!
//! The hashed secret is never serialized; API responses use the
//! [`PublicUser`] projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account record
///
/// At most one user exists per email for the lifetime of the store.
/// Records are created at registration and read at login; they are never
/// mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store on creation
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique key)
    pub email: String,

    /// Hashed password (Argon2id PHC string); never serialized
    #[serde(skip_serializing)]
    pub secret: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Projection without credential material, safe for API responses.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public user representation (no secret, no bookkeeping fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Input for creating a user; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Already-hashed password secret
    pub secret: String,
}

/// A revocation-list entry for one raw bearer token string.
///
/// The token is opaque to the store: it is recorded and matched verbatim,
/// never decoded. `recorded_at` bounds retention: entries older than the
/// maximum token lifetime can be pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedToken {
    /// The raw bearer token string
    pub token: String,

    /// When the token was revoked
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            secret: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("argon2id"));

        let json = serde_json::to_string(&user.to_public()).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("ann@x.com"));
    }
}
