//! Store backends
//!
//! The store traits live in `keygate-core`; this module provides the
//! PostgreSQL implementations used when `DATABASE_URL` is configured.

pub mod postgres;

pub use postgres::{PostgresRevocationStore, PostgresUserStore};
