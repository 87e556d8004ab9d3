//! Configuration modules, each loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the CORS layer
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token expiry settings

pub mod cors;
pub mod database;
pub mod jwt;
