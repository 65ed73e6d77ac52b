//! # Joushiki Shared Library
//!
//! This crate contains the types and database logic shared between the
//! joushiki API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models (common-sense facts, users, votes)
//! - `db`: Connection pool and startup schema creation
//! - `auth`: Password hashing utilities

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the joushiki shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
