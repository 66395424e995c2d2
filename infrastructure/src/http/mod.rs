//! HTTP adapter for the dashboard backend.
//!
//! [`HttpGateway`] implements the [`ApiGateway`](labdash_application::ApiGateway)
//! port on top of `reqwest`: every request carries the stored bearer token and
//! a `401` clears the session and navigates to the login page.

mod gateway;
mod request;

pub use gateway::HttpGateway;
pub use request::{ApiRequest, RequestBody};
