/// PostgreSQL plumbing for the `postgres` store backend
///
/// # Modules
///
/// - `pool`: connection pool creation and health checks
/// - `migrations`: embedded migration runner

pub mod migrations;
pub mod pool;
