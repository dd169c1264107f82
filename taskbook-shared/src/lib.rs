//! # Taskbook Shared Library
//!
//! This crate contains the types, storage layer and authentication primitives
//! used by the Taskbook API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, token issuing and the authenticated user context
//! - `db`: Connection pool, migrations and the dynamic update builder
//! - `models`: Database models and their SQL operations
//! - `store`: Storage traits with PostgreSQL and in-memory implementations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
