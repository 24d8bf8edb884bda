//! HTTP boundary around the classifier.

pub mod auth;
pub mod routes;

pub use auth::Authenticated;
pub use routes::{AppState, MAX_BODY_BYTES, ParseResponse, router, serve};
