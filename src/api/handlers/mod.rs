//! HTTP request handlers.

pub mod auth_handler;
pub mod collection_handler;
pub mod level_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use collection_handler::collection_routes;
pub use level_handler::level_routes;
pub use review_handler::review_routes;
pub use user_handler::user_routes;

use crate::errors::AppError;

/// Per-route fallback: a known path hit with the wrong verb answers
/// with the method-not-allowed error body rather than a bare 404.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
