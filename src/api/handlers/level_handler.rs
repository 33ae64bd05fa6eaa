//! Level handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateLevel, Level, UpdateLevel};
use crate::errors::AppResult;
use crate::types::UpdatedResponse;

use super::method_not_allowed;

/// Create level routes
pub fn level_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_level).fallback(method_not_allowed))
        .route(
            "/:id",
            get(get_level)
                .put(update_level)
                .fallback(method_not_allowed),
        )
}

/// Create a new draft level
#[utoipa::path(
    post,
    path = "/levels",
    tag = "Levels",
    security(("bearer_auth" = [])),
    request_body = CreateLevel,
    responses(
        (status = 201, description = "Level created", body = Level),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_level(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateLevel>,
) -> AppResult<(StatusCode, Json<Level>)> {
    let level = state
        .level_service
        .create_level(current_user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(level)))
}

/// Get a level by ID
#[utoipa::path(
    get,
    path = "/levels/{id}",
    tag = "Levels",
    params(
        ("id" = Uuid, Path, description = "Level ID")
    ),
    responses(
        (status = 200, description = "Level found", body = Level),
        (status = 404, description = "Level not found")
    )
)]
pub async fn get_level(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Level>> {
    let level = state.level_service.get_level(id).await?;

    Ok(Json(level))
}

/// Update a level (owner only).
///
/// `collection_ids`, when present, is the complete desired set of
/// collections containing this level.
#[utoipa::path(
    put,
    path = "/levels/{id}",
    tag = "Levels",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Level ID")
    ),
    request_body = UpdateLevel,
    responses(
        (status = 200, description = "Level updated", body = UpdatedResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Level not found")
    )
)]
pub async fn update_level(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLevel>,
) -> AppResult<Json<UpdatedResponse>> {
    state
        .level_service
        .update_level(current_user.id, id, payload)
        .await?;

    Ok(Json(UpdatedResponse::new()))
}
