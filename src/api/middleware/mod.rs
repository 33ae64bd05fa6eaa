//! HTTP middleware.

pub mod auth;

pub use auth::{identity_middleware, CurrentUser};
