// handlers/mod.rs - 2-Tier Handler Architecture
//
// Public (no auth) → Protected (JWT auth)
pub mod public;    // Tier 1: register / login
pub mod protected; // Tier 2: bearer token required
pub mod utils;
