/// Database access layer
///
/// - `pool`: PostgreSQL connection pool creation and health checks
/// - `schema`: idempotent startup table creation

pub mod pool;
pub mod schema;
