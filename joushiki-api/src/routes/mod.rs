/// API route handlers
///
/// Route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login and derived user level
/// - `common_sense`: Fact listing and lookup
/// - `votes`: Vote upsert, check, statistics and per-user listings

pub mod auth;
pub mod common_sense;
pub mod health;
pub mod votes;
