//! Authentication extractor and role-authorization layers.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] validates the JWT and extracts claims
//! 3. [`role`] layers gate each role-scoped route group
//! 4. Handlers do any remaining per-record ownership checks

pub mod auth;
pub mod role;
