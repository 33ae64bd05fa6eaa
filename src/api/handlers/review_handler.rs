//! Review handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateReview, Review, ReviewWithLevel};
use crate::errors::AppResult;

use super::method_not_allowed;

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review).fallback(method_not_allowed))
        .route("/latest", get(latest_reviews).fallback(method_not_allowed))
}

/// Get the latest reviews with text, newest first
#[utoipa::path(
    get,
    path = "/reviews/latest",
    tag = "Reviews",
    responses(
        (status = 200, description = "Latest reviews", body = Vec<ReviewWithLevel>),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Lookup failed")
    )
)]
pub async fn latest_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReviewWithLevel>>> {
    let reviews = state.review_service.latest().await?;

    Ok(Json(reviews))
}

/// Create a review for a level
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Level not found"),
        (status = 409, description = "Review already exists")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let review = state
        .review_service
        .create_review(current_user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
