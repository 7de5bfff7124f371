//! Database connectors and utilities for the users service.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{PostgresConfig, connect_from_config};
//!
//! let db = connect_from_config(PostgresConfig::from_env()?).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
