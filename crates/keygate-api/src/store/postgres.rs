//! PostgreSQL store implementations
//!
//! Uniqueness is enforced by the database, not by application-level
//! checks: `users.email` carries a unique constraint and revocations are
//! inserted with `ON CONFLICT DO NOTHING`, so the at-most-one-success
//! contract holds across processes. Schema lives in `migrations/`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keygate_core::model::{NewUser, User};
use keygate_core::store::{RecordOutcome, RevocationStore, StoreError, UserStore};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    secret: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            secret: row.secret,
            created_at: row.created_at,
        }
    }
}

/// User records backed by the `users` table
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, secret, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, secret, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, name, email, secret, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.secret)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            _ => backend(e),
        })?;

        Ok(row.into())
    }
}

/// Revocation list backed by the `revoked_tokens` table
#[derive(Clone)]
pub struct PostgresRevocationStore {
    pool: PgPool,
}

impl PostgresRevocationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for PostgresRevocationStore {
    async fn contains(&self, token: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(exists)
    }

    async fn record(&self, token: &str) -> Result<RecordOutcome, StoreError> {
        // The primary key on `token` makes the insert race-safe: exactly
        // one concurrent caller gets a row in.
        let result = sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token, recorded_at)
            VALUES ($1, NOW())
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 1 {
            Ok(RecordOutcome::Recorded)
        } else {
            Ok(RecordOutcome::AlreadyRecorded)
        }
    }

    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE recorded_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(result.rows_affected())
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
