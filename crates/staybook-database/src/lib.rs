//! # staybook-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all StayBook entities.
//!
//! Repository methods that take a `&mut Transaction` are used by the
//! reservation and payment workflows, which need several statements to
//! commit or roll back together.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use sqlx::{PgPool, Postgres, Transaction};
