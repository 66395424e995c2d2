//! Session domain.
//!
//! - [`credential::SessionCredential`]: the bearer token held between login and logout
//! - [`route`]: public/protected pages and the client-side page guard

pub mod credential;
pub mod route;
