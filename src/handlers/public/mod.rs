// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Registration and login: the only API endpoints reachable without a bearer
// token. Every input is untrusted and validated field by field.
//
// Security Level: None
// Route Prefix: <base path> (e.g., /api/register, /api/login)

pub mod auth;

pub use auth::{login_post, register_post};
