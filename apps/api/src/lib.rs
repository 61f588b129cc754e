//! BEO quantity and print pagination engine.
//!
//! Pure calculators (`quantity`, `layout`) plus a stateless axum surface over them.

pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod quantity;
pub mod routes;
pub mod state;
