//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::Profile;

use super::method_not_allowed;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user).fallback(method_not_allowed))
        .route(
            "/:name/profile",
            get(get_profile).fallback(method_not_allowed),
        )
}

/// Get the current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Get a user's aggregated profile by name.
///
/// An unknown name yields the empty profile state with `user: null`,
/// not an error.
#[utoipa::path(
    get,
    path = "/users/{name}/profile",
    tag = "Users",
    params(
        ("name" = String, Path, description = "User display name")
    ),
    responses(
        (status = 200, description = "Profile data (user is null when not found)", body = Profile)
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Profile>> {
    let profile = state.user_service.get_profile(&name).await?;

    Ok(Json(profile))
}
