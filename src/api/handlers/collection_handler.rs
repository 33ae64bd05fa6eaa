//! Collection handlers.

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
use crate::domain::{Collection, CollectionWithLevels, CreateCollection, UpdateCollection};
use crate::errors::AppResult;

use super::method_not_allowed;

/// Create collection routes
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_collection).fallback(method_not_allowed))
        .route(
            "/:id",
            get(get_collection)
                .put(update_collection)
                .fallback(method_not_allowed),
        )
}

/// Get a collection with its levels in stored order
#[utoipa::path(
    get,
    path = "/collections/{id}",
    tag = "Collections",
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection with ordered levels"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CollectionWithLevels>> {
    let collection = state.collection_service.get_collection(id).await?;

    Ok(Json(collection))
}

/// Create a new collection
#[utoipa::path(
    post,
    path = "/collections",
    tag = "Collections",
    security(("bearer_auth" = [])),
    request_body = CreateCollection,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_collection(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateCollection>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    let collection = state
        .collection_service
        .create_collection(current_user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(collection)))
}

/// Update a collection (owner only).
///
/// `levels`, when present, replaces the ordered membership wholesale;
/// submit the complete desired ordering each time.
#[utoipa::path(
    put,
    path = "/collections/{id}",
    tag = "Collections",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Collection ID")
    ),
    request_body = UpdateCollection,
    responses(
        (status = 200, description = "Updated collection with levels in the new order"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn update_collection(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCollection>,
) -> AppResult<Json<CollectionWithLevels>> {
    let collection = state
        .collection_service
        .update_collection(current_user.id, id, payload)
        .await?;

    Ok(Json(collection))
}
