/// Middleware modules for the API server
///
/// Authentication and role guards live in `rentledger_shared::auth::middleware`.

pub mod security;
